//! Coercion of untyped resolver output into typed values

use crate::error::{Error, Result};
use crate::typed::{IntOrText, Text};
use crate::value::Value;

/// Accepts only strings.
pub fn coerce_text(value: Value) -> Result<Text> {
    match value {
        Value::String(s) => Ok(Text(s)),
        other => Err(Error::type_mismatch("string", other.type_name())),
    }
}

/// Accepts strings and integers. Integers are narrowed to 32 bits.
pub fn coerce_int_or_text(value: Value) -> Result<IntOrText> {
    match value {
        Value::String(s) => Ok(IntOrText::Text(s)),
        Value::Integer(i) => Ok(IntOrText::from_int(i)),
        other => Err(Error::type_mismatch("integer or string", other.type_name())),
    }
}
