//! valstore-core: configuration values given directly or by reference
//!
//! A field is either a literal ("direct") or a reference to a field on
//! another object ("indirect"). A store resolves either form to a typed
//! value on demand, delegating references to a [`ReferenceResolver`].
//!
//! # Example
//!
//! ```rust
//! use valstore_core::{ObjectGraphResolver, ResolverContext, Text, TextStore, Value};
//!
//! let graph: Value = serde_yaml::from_str(r#"
//! Service:
//!   default:
//!     web:
//!       spec:
//!         host: web.default.svc
//! "#).unwrap();
//!
//! let store: TextStore = serde_yaml::from_str(r#"
//! indirect:
//!   kind: Service
//!   namespace: default
//!   name: web
//!   fieldPath: spec.host
//! "#).unwrap();
//!
//! let resolver = ObjectGraphResolver::new(graph);
//! let host = store.resolve(&resolver, &ResolverContext::new("app.host")).unwrap();
//! assert_eq!(host, Some(Text::new("web.default.svc")));
//! ```

pub mod coerce;
pub mod error;
pub mod loader;
pub mod reference;
pub mod resolver;
pub mod store;
pub mod typed;
pub mod value;

pub use error::{Error, ErrorKind, ResolverErrorKind, Result};
pub use reference::{ObjectFieldReference, ObjectReference};
pub use resolver::{
    CancelFlag, FnResolver, ObjectGraphResolver, ReferenceResolver, ResolverContext,
    ResolverRegistry,
};
pub use store::{IntOrTextStore, TextStore, ValueStore};
pub use typed::{IntOrText, Text, TypedValue};
pub use value::Value;
