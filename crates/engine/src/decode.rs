//! Hand-rolled decoding of `serde_json::Value` into target types.
//!
//! Decoding is done by explicit impls rather than a derived
//! `Deserialize` so the raw-value extractor can report the mismatch as
//! `"expected <type>, encountered <type>"` against a field path. The
//! caller supplies the path; a [`DecodeError`] carries the message only.

use std::fmt;

/// Name of a JSON value's type, as used in mismatch messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// A decoding failure. Path-free: the extractor that triggered the
/// decode attaches its own path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    pub message: String,
}

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        DecodeError {
            message: message.into(),
        }
    }

    /// The standard mismatch message for a wrongly-typed value.
    pub fn mismatch(expected: &str, actual: &serde_json::Value) -> Self {
        DecodeError::new(format!(
            "expected {}, encountered {}",
            expected,
            json_type_name(actual)
        ))
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DecodeError {}

/// Types that can be decoded from a JSON value.
pub trait FromValue: Sized {
    /// Type name used in mismatch messages, e.g. `"string"`.
    const EXPECTED: &'static str;

    fn from_value(value: &serde_json::Value) -> Result<Self, DecodeError>;
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &serde_json::Value) -> Result<Self, DecodeError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| DecodeError::mismatch(Self::EXPECTED, value))
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_value(value: &serde_json::Value) -> Result<Self, DecodeError> {
        value
            .as_bool()
            .ok_or_else(|| DecodeError::mismatch(Self::EXPECTED, value))
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: &serde_json::Value) -> Result<Self, DecodeError> {
        value
            .as_i64()
            .ok_or_else(|| DecodeError::mismatch(Self::EXPECTED, value))
    }
}

impl FromValue for u64 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: &serde_json::Value) -> Result<Self, DecodeError> {
        value
            .as_u64()
            .ok_or_else(|| DecodeError::mismatch(Self::EXPECTED, value))
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "number";

    fn from_value(value: &serde_json::Value) -> Result<Self, DecodeError> {
        value
            .as_f64()
            .ok_or_else(|| DecodeError::mismatch(Self::EXPECTED, value))
    }
}

/// Passthrough: any JSON value decodes as itself.
impl FromValue for serde_json::Value {
    const EXPECTED: &'static str = "value";

    fn from_value(value: &serde_json::Value) -> Result<Self, DecodeError> {
        Ok(value.clone())
    }
}

/// `null` decodes to `None`; anything else must decode as `T`.
impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: &serde_json::Value) -> Result<Self, DecodeError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "array";

    fn from_value(value: &serde_json::Value) -> Result<Self, DecodeError> {
        let items = value
            .as_array()
            .ok_or_else(|| DecodeError::mismatch(Self::EXPECTED, value))?;
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let decoded = T::from_value(item)
                .map_err(|e| DecodeError::new(format!("{} (at index {})", e.message, i)))?;
            out.push(decoded);
        }
        Ok(out)
    }
}

impl FromValue for std::collections::BTreeMap<String, serde_json::Value> {
    const EXPECTED: &'static str = "object";

    fn from_value(value: &serde_json::Value) -> Result<Self, DecodeError> {
        let obj = value
            .as_object()
            .ok_or_else(|| DecodeError::mismatch(Self::EXPECTED, value))?;
        Ok(obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_mismatch_names_both_types() {
        let err = String::from_value(&json!(1)).unwrap_err();
        assert_eq!(err.message, "expected string, encountered number");
    }

    #[test]
    fn bool_decodes() {
        assert!(bool::from_value(&json!(true)).unwrap());
        let err = bool::from_value(&json!("yes")).unwrap_err();
        assert_eq!(err.message, "expected boolean, encountered string");
    }

    #[test]
    fn integer_rejects_fractions() {
        assert_eq!(i64::from_value(&json!(42)).unwrap(), 42);
        let err = i64::from_value(&json!(1.5)).unwrap_err();
        assert_eq!(err.message, "expected integer, encountered number");
    }

    #[test]
    fn option_maps_null_to_none() {
        assert_eq!(Option::<String>::from_value(&json!(null)).unwrap(), None);
        assert_eq!(
            Option::<String>::from_value(&json!("x")).unwrap(),
            Some("x".to_string())
        );
        let err = Option::<String>::from_value(&json!(3)).unwrap_err();
        assert_eq!(err.message, "expected string, encountered number");
    }

    #[test]
    fn vec_reports_offending_index() {
        let err = Vec::<String>::from_value(&json!(["ok", 7])).unwrap_err();
        assert_eq!(err.message, "expected string, encountered number (at index 1)");
    }

    #[test]
    fn value_passthrough_never_fails() {
        let v = json!({"anything": [1, 2, 3]});
        assert_eq!(serde_json::Value::from_value(&v).unwrap(), v);
    }
}
