//! End-to-end: stores and an object graph loaded from YAML, resolved
//! through a kind-keyed registry.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use valstore_core::loader::from_yaml;
use valstore_core::{
    ErrorKind, IntOrText, IntOrTextStore, ObjectGraphResolver, ResolverContext, ResolverRegistry,
    Text, TextStore, TypedValue, Value, ValueStore,
};

const GRAPH: &str = r#"
Service:
  onecloud:
    keystone:
      spec:
        host: keystone.onecloud.svc
        ports:
          - name: public
            port: 5000
          - name: admin
            port: 35357
        type: ClusterIP
ConfigMap:
  onecloud:
    region:
      data:
        name: region0
        replicas: 3
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthConfig {
    host: TextStore,
    port: IntOrTextStore,
    #[serde(default)]
    region: TextStore,
    #[serde(default)]
    admin_port: IntOrTextStore,
}

const CONFIG: &str = r#"
host:
  indirect:
    kind: Service
    namespace: onecloud
    name: keystone
    fieldPath: spec.host
port:
  direct: 443
  indirect:
    kind: Service
    namespace: onecloud
    name: keystone
    fieldPath: spec.ports[0].port
region:
  indirect:
    kind: ConfigMap
    namespace: onecloud
    name: region
    fieldPath: data.name
adminPort:
  indirect:
    kind: Service
    namespace: onecloud
    name: keystone
    fieldPath: spec.ports[1].port
"#;

fn registry() -> ResolverRegistry {
    let graph: Value = from_yaml(GRAPH).unwrap();
    let objects = Arc::new(ObjectGraphResolver::new(graph));
    let mut registry = ResolverRegistry::new();
    registry.register("Service", objects.clone());
    registry.register("ConfigMap", objects);
    registry
}

#[test]
fn resolves_mixed_direct_and_indirect_fields() {
    let config: AuthConfig = from_yaml(CONFIG).unwrap();
    let registry = registry();

    let host = config
        .host
        .resolve(&registry, &ResolverContext::new("auth.host"))
        .unwrap();
    assert_eq!(host, Some(Text::new("keystone.onecloud.svc")));

    let port = config
        .port
        .resolve(&registry, &ResolverContext::new("auth.port"))
        .unwrap();
    assert_eq!(port, Some(IntOrText::Int(443)));

    let region = config
        .region
        .resolve(&registry, &ResolverContext::new("auth.region"))
        .unwrap();
    assert_eq!(region.as_ref().map(Text::as_str), Some("region0"));

    let admin_port = config
        .admin_port
        .resolve(&registry, &ResolverContext::new("auth.adminPort"))
        .unwrap();
    assert_eq!(admin_port.and_then(|v| v.as_i32()), Some(35357));
}

#[test]
fn integer_field_into_text_store_is_a_mismatch() {
    let store: TextStore = from_yaml(
        r#"
indirect:
  kind: ConfigMap
  namespace: onecloud
  name: region
  fieldPath: data.replicas
"#,
    )
    .unwrap();

    let err = store
        .resolve(&registry(), &ResolverContext::new("region.replicas"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert!(err.to_string().contains("got integer"));
}

#[test]
fn map_of_value_stores_resolves_through_one_dispatcher() {
    let mut fields: IndexMap<String, ValueStore> = IndexMap::new();
    fields.insert(
        "service.type".into(),
        ValueStore::from(from_yaml::<TextStore>(
            "indirect: {kind: Service, namespace: onecloud, name: keystone, fieldPath: spec.type}",
        )
        .unwrap()),
    );
    fields.insert(
        "service.missing".into(),
        ValueStore::from(from_yaml::<IntOrTextStore>(
            "indirect: {kind: Service, namespace: onecloud, name: keystone, fieldPath: spec.nodePort}",
        )
        .unwrap()),
    );
    fields.insert("unset".into(), ValueStore::from(TextStore::default()));

    let registry = registry();
    let resolved: Vec<(String, Option<TypedValue>)> = fields
        .iter()
        .map(|(path, store)| {
            let value = store.resolve(&registry, &ResolverContext::new(path)).unwrap();
            (path.clone(), value)
        })
        .collect();

    assert_eq!(
        resolved,
        vec![
            (
                "service.type".to_string(),
                Some(TypedValue::Text(Text::new("ClusterIP")))
            ),
            ("service.missing".to_string(), None),
            ("unset".to_string(), None),
        ]
    );
}

#[test]
fn unregistered_kind_fails_without_default() {
    let store = TextStore::indirect(from_yaml("{kind: Secret, name: db, fieldPath: data.password}").unwrap());
    let err = store
        .resolve(&registry(), &ResolverContext::new("db.password"))
        .unwrap_err();
    assert!(err.is_resolver_failure());
    assert_eq!(err.path, Some("db.password".into()));
}
