//! Value stores
//!
//! A store holds a field configured either directly (a literal) or
//! indirectly (a reference into the object graph). A non-empty direct
//! value always wins and the reference is then never looked at, so direct
//! values resolve without a live resolver.
//!
//! ```rust
//! use valstore_core::{IntOrText, IntOrTextStore, ObjectGraphResolver, ResolverContext, Value};
//!
//! let store: IntOrTextStore = serde_yaml::from_str("direct: 8080").unwrap();
//! let resolver = ObjectGraphResolver::new(Value::Null);
//! let port = store.resolve(&resolver, &ResolverContext::new("api.port")).unwrap();
//! assert_eq!(port, Some(IntOrText::Int(8080)));
//! ```

use serde::{Deserialize, Serialize};

use crate::coerce::{coerce_int_or_text, coerce_text};
use crate::error::Result;
use crate::reference::ObjectFieldReference;
use crate::resolver::{resolve_indirect, ReferenceResolver, ResolverContext};
use crate::typed::{IntOrText, Text, TypedValue};

/// A string field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStore {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub direct: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indirect: Option<ObjectFieldReference>,
}

impl TextStore {
    pub fn direct(value: impl Into<String>) -> Self {
        Self {
            direct: value.into(),
            indirect: None,
        }
    }

    pub fn indirect(reference: ObjectFieldReference) -> Self {
        Self {
            direct: String::new(),
            indirect: Some(reference),
        }
    }

    pub fn has_direct(&self) -> bool {
        !self.direct.is_empty()
    }

    pub fn has_indirect(&self) -> bool {
        self.indirect.is_some()
    }

    /// Resolve to a [`Text`].
    ///
    /// `Ok(None)` means nothing was configured or the reference produced
    /// no value. Resolver errors are returned as-is; a non-string value is
    /// a type mismatch.
    pub fn resolve(
        &self,
        resolver: &dyn ReferenceResolver,
        ctx: &ResolverContext,
    ) -> Result<Option<Text>> {
        if self.has_direct() {
            log::trace!("Using direct value for '{}'", ctx.config_path);
            return Ok(Some(Text(self.direct.clone())));
        }

        match resolve_indirect(self.indirect.as_ref(), resolver, ctx)? {
            Some(value) => coerce_text(value)
                .map(Some)
                .map_err(|e| match ctx.path() {
                    Some(path) => e.with_path(path),
                    None => e,
                }),
            None => Ok(None),
        }
    }
}

/// An integer-or-string field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntOrTextStore {
    /// `Some(Unset)` is not written out, so it reads back as `None`.
    #[serde(default, skip_serializing_if = "direct_is_unset")]
    pub direct: Option<IntOrText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indirect: Option<ObjectFieldReference>,
}

fn direct_is_unset(direct: &Option<IntOrText>) -> bool {
    matches!(direct, None | Some(IntOrText::Unset))
}

impl IntOrTextStore {
    pub fn direct(value: impl Into<IntOrText>) -> Self {
        Self {
            direct: Some(value.into()),
            indirect: None,
        }
    }

    pub fn indirect(reference: ObjectFieldReference) -> Self {
        Self {
            direct: None,
            indirect: Some(reference),
        }
    }

    pub fn has_direct(&self) -> bool {
        self.direct.is_some()
    }

    pub fn has_indirect(&self) -> bool {
        self.indirect.is_some()
    }

    /// Resolve to an [`IntOrText`].
    ///
    /// A present direct value is returned unchanged, even if it is zero.
    /// Resolved strings become the text branch; resolved integers become
    /// the integer branch, truncated to 32 bits.
    pub fn resolve(
        &self,
        resolver: &dyn ReferenceResolver,
        ctx: &ResolverContext,
    ) -> Result<Option<IntOrText>> {
        if let Some(direct) = &self.direct {
            log::trace!("Using direct value for '{}'", ctx.config_path);
            return Ok(Some(direct.clone()));
        }

        match resolve_indirect(self.indirect.as_ref(), resolver, ctx)? {
            Some(value) => coerce_int_or_text(value)
                .map(Some)
                .map_err(|e| match ctx.path() {
                    Some(path) => e.with_path(path),
                    None => e,
                }),
            None => Ok(None),
        }
    }
}

/// Any store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueStore {
    Text(TextStore),
    IntOrText(IntOrTextStore),
}

impl ValueStore {
    pub fn has_direct(&self) -> bool {
        match self {
            ValueStore::Text(s) => s.has_direct(),
            ValueStore::IntOrText(s) => s.has_direct(),
        }
    }

    pub fn has_indirect(&self) -> bool {
        match self {
            ValueStore::Text(s) => s.has_indirect(),
            ValueStore::IntOrText(s) => s.has_indirect(),
        }
    }

    pub fn resolve(
        &self,
        resolver: &dyn ReferenceResolver,
        ctx: &ResolverContext,
    ) -> Result<Option<TypedValue>> {
        Ok(match self {
            ValueStore::Text(s) => s.resolve(resolver, ctx)?.map(TypedValue::Text),
            ValueStore::IntOrText(s) => s.resolve(resolver, ctx)?.map(TypedValue::IntOrText),
        })
    }
}

impl From<TextStore> for ValueStore {
    fn from(s: TextStore) -> Self {
        ValueStore::Text(s)
    }
}

impl From<IntOrTextStore> for ValueStore {
    fn from(s: IntOrTextStore) -> Self {
        ValueStore::IntOrText(s)
    }
}
