//! Typed values produced by resolving a store
//!
//! [`Text`] and [`IntOrText`] are the two value shapes a store can yield.
//! [`TypedValue`] is the closed union of both, with `is_zero` and
//! `interface` dispatched by match.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::Value;

/// A resolved string value
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Text(pub String);

impl Text {
    pub fn new(s: impl Into<String>) -> Self {
        Text(s.into())
    }

    /// True iff the string is empty
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The untyped representation: always a string
    pub fn interface(&self) -> Value {
        Value::String(self.0.clone())
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text(s)
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text(s.to_string())
    }
}

/// An integer or a string, serialized as whichever one it holds.
///
/// `Unset` is the state of a value that was never given either branch. It
/// is only reachable through `Default` or direct construction; resolution
/// never produces it. It serializes as null, which deserializes as an absent
/// value rather than `Unset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrText {
    Int(i32),
    Text(String),
    #[default]
    Unset,
}

impl IntOrText {
    /// Build the integer branch. Values outside the i32 range wrap.
    pub fn from_int(i: i64) -> Self {
        let narrowed = i as i32;
        if i64::from(narrowed) != i {
            log::debug!("Integer {} truncated to {} in int-or-text value", i, narrowed);
        }
        IntOrText::Int(narrowed)
    }

    pub fn from_text(s: impl Into<String>) -> Self {
        IntOrText::Text(s.into())
    }

    /// The string branch, if active
    pub fn as_str(&self) -> Option<&str> {
        match self {
            IntOrText::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The integer branch, if active
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            IntOrText::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// True for `Unset`, an empty string or zero
    pub fn is_zero(&self) -> bool {
        match self {
            IntOrText::Int(i) => *i == 0,
            IntOrText::Text(s) => s.is_empty(),
            IntOrText::Unset => true,
        }
    }

    /// The held integer or string; `Unset` has no branch and maps to null
    pub fn interface(&self) -> Value {
        match self {
            IntOrText::Int(i) => Value::Integer(i64::from(*i)),
            IntOrText::Text(s) => Value::String(s.clone()),
            IntOrText::Unset => Value::Null,
        }
    }
}

impl fmt::Display for IntOrText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntOrText::Int(i) => write!(f, "{}", i),
            IntOrText::Text(s) => f.write_str(s),
            IntOrText::Unset => f.write_str("<unset>"),
        }
    }
}

impl From<i32> for IntOrText {
    fn from(i: i32) -> Self {
        IntOrText::Int(i)
    }
}

impl From<&str> for IntOrText {
    fn from(s: &str) -> Self {
        IntOrText::Text(s.to_string())
    }
}

impl From<String> for IntOrText {
    fn from(s: String) -> Self {
        IntOrText::Text(s)
    }
}

/// Any value a store can resolve to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    Text(Text),
    IntOrText(IntOrText),
}

impl TypedValue {
    pub fn is_zero(&self) -> bool {
        match self {
            TypedValue::Text(t) => t.is_zero(),
            TypedValue::IntOrText(v) => v.is_zero(),
        }
    }

    pub fn interface(&self) -> Value {
        match self {
            TypedValue::Text(t) => t.interface(),
            TypedValue::IntOrText(v) => v.interface(),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Text(t) => fmt::Display::fmt(t, f),
            TypedValue::IntOrText(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl From<Text> for TypedValue {
    fn from(t: Text) -> Self {
        TypedValue::Text(t)
    }
}

impl From<IntOrText> for TypedValue {
    fn from(v: IntOrText) -> Self {
        TypedValue::IntOrText(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_is_zero() {
        assert!(Text::new("").is_zero());
        assert!(!Text::new("a").is_zero());
        assert!(Text::default().is_zero());
    }

    #[test]
    fn test_text_interface() {
        assert_eq!(Text::new("z").interface(), Value::String("z".into()));
        assert_eq!(Text::new("z").to_string(), "z");
    }

    #[test]
    fn test_int_or_text_is_zero() {
        assert!(IntOrText::Int(0).is_zero());
        assert!(!IntOrText::Int(3).is_zero());
        assert!(IntOrText::from_text("").is_zero());
        assert!(!IntOrText::from_text("x").is_zero());
        assert!(IntOrText::Unset.is_zero());
        assert!(IntOrText::default().is_zero());
    }

    #[test]
    fn test_int_or_text_interface() {
        assert_eq!(IntOrText::from_text("z").interface(), Value::String("z".into()));
        assert_eq!(IntOrText::Int(9).interface(), Value::Integer(9));
        assert_eq!(IntOrText::Unset.interface(), Value::Null);
    }

    #[test]
    fn test_int_or_text_accessors() {
        let text = IntOrText::from_text("abc");
        assert_eq!(text.as_str(), Some("abc"));
        assert_eq!(text.as_i32(), None);

        let int = IntOrText::Int(7);
        assert_eq!(int.as_i32(), Some(7));
        assert_eq!(int.as_str(), None);

        assert_eq!(IntOrText::Unset.as_str(), None);
        assert_eq!(IntOrText::Unset.as_i32(), None);
    }

    #[test]
    fn test_from_int_narrows_to_32_bits() {
        assert_eq!(IntOrText::from_int(42), IntOrText::Int(42));
        assert_eq!(IntOrText::from_int(-1), IntOrText::Int(-1));
        assert_eq!(IntOrText::from_int(1 << 32), IntOrText::Int(0));
        assert_eq!(
            IntOrText::from_int(i64::from(i32::MAX) + 1),
            IntOrText::Int(i32::MIN)
        );
    }

    #[test]
    fn test_int_or_text_serde_shape() {
        let int: IntOrText = serde_json::from_str("8080").unwrap();
        assert_eq!(int, IntOrText::Int(8080));

        let text: IntOrText = serde_json::from_str("\"http\"").unwrap();
        assert_eq!(text, IntOrText::from_text("http"));

        // A quoted number stays text
        let quoted: IntOrText = serde_yaml::from_str("'8080'").unwrap();
        assert_eq!(quoted, IntOrText::from_text("8080"));

        assert_eq!(serde_json::to_string(&IntOrText::Int(5)).unwrap(), "5");
        assert_eq!(
            serde_json::to_string(&IntOrText::from_text("a")).unwrap(),
            "\"a\""
        );
    }

    #[test]
    fn test_typed_value_dispatch() {
        let text = TypedValue::from(Text::new(""));
        assert!(text.is_zero());
        assert_eq!(text.interface(), Value::String(String::new()));

        let port = TypedValue::from(IntOrText::Int(443));
        assert!(!port.is_zero());
        assert_eq!(port.interface(), Value::Integer(443));
        assert_eq!(port.to_string(), "443");
    }
}
