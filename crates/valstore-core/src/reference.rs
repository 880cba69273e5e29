//! Reference descriptors
//!
//! An indirect value points at "some field on some object". The descriptor
//! is plain data deserialized from configuration; interpreting it is up to
//! a [`ReferenceResolver`](crate::resolver::ReferenceResolver).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one object in the object graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    /// Object kind, e.g. "Service"
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
}

impl ObjectReference {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            namespace: None,
            name: name.into(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}/{}", self.kind, ns, self.name),
            None => write!(f, "{}/{}", self.kind, self.name),
        }
    }
}

/// A field on a referenced object
///
/// Serialized flat: `{kind, namespace?, name, fieldPath}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectFieldReference {
    #[serde(flatten)]
    pub object: ObjectReference,
    /// Dotted path into the object, e.g. "spec.ports[0].port"
    pub field_path: String,
}

impl ObjectFieldReference {
    pub fn new(object: ObjectReference, field_path: impl Into<String>) -> Self {
        Self {
            object,
            field_path: field_path.into(),
        }
    }
}

impl fmt::Display for ObjectFieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.object, self.field_path)
    }
}
