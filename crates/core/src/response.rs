//! Projection of an [`Outcome`] into the wire-format response.
//!
//! The response has exactly three top-level keys -- `parse_error`,
//! `field_errors`, `result` -- and exactly one of them is ever
//! populated; the other two take their empty/null defaults.

use crate::outcome::{Outcome, ParseError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire shape of a structural parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseErrorBody {
    /// Rendered dotted path, or the empty string for a failure at the
    /// document root.
    pub field: String,
    pub message: String,
}

impl From<ParseError> for ParseErrorBody {
    fn from(err: ParseError) -> Self {
        ParseErrorBody {
            field: err.path.render(),
            message: err.message,
        }
    }
}

/// The flat response returned to the client after one full parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResponse {
    /// Structural failure, if any.
    pub parse_error: Option<ParseErrorBody>,
    /// Per-field validation errors keyed by rendered dotted path.
    pub field_errors: BTreeMap<String, serde_json::Value>,
    /// Serialized success payload, or null.
    pub result: Option<serde_json::Value>,
}

impl FormResponse {
    /// Flatten a final outcome into the wire shape.
    ///
    /// Serializing the success payload is the only fallible step.
    pub fn from_outcome<T: Serialize>(outcome: Outcome<T>) -> Result<FormResponse, serde_json::Error> {
        Ok(match outcome {
            Outcome::ParseFailed(err) => FormResponse {
                parse_error: Some(err.into()),
                field_errors: BTreeMap::new(),
                result: None,
            },
            Outcome::Invalid(errs) => FormResponse {
                parse_error: None,
                field_errors: errs.into_rendered(),
                result: None,
            },
            Outcome::Success(value) => FormResponse {
                parse_error: None,
                field_errors: BTreeMap::new(),
                result: Some(serde_json::to_value(value)?),
            },
        })
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_errors::FieldErrors;
    use crate::path::FieldPath;
    use serde_json::json;

    #[test]
    fn parse_failure_populates_only_parse_error() {
        let outcome: Outcome<i64> =
            Outcome::parse_failed(FieldPath::from_segments(["username"]), "expected string");
        let response = FormResponse::from_outcome(outcome).unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "parse_error": {"field": "username", "message": "expected string"},
                "field_errors": {},
                "result": null,
            })
        );
    }

    #[test]
    fn root_parse_failure_renders_empty_field() {
        let outcome: Outcome<i64> =
            Outcome::parse_failed(FieldPath::root(), "expected object, encountered array");
        let response = FormResponse::from_outcome(outcome).unwrap();
        assert_eq!(response.parse_error.unwrap().field, "");
    }

    #[test]
    fn invalid_populates_only_field_errors() {
        let errs = FieldErrors::singleton(
            FieldPath::from_segments(["password"]),
            json!("This field cannot be empty."),
        );
        let response = FormResponse::from_outcome(Outcome::<i64>::Invalid(errs)).unwrap();

        assert!(response.parse_error.is_none());
        assert!(response.result.is_none());
        assert_eq!(
            response.field_errors["password"],
            json!("This field cannot be empty.")
        );
    }

    #[test]
    fn success_populates_only_result() {
        let response = FormResponse::from_outcome(Outcome::Success(json!({"ok": true}))).unwrap();
        assert!(response.parse_error.is_none());
        assert!(response.field_errors.is_empty());
        assert_eq!(response.result, Some(json!({"ok": true})));
    }
}
