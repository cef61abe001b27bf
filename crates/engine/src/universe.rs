//! The field-name universe: the set of legal field names for a form.
//!
//! An explicit allow-list built once at startup. Every combinator
//! constructor that takes a name validates it against the universe and
//! fails construction loudly on an unknown name, so a typo surfaces the
//! first time the form is built rather than as a silently-dead branch.

use std::collections::BTreeSet;

/// Construction-time form-definition errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormDefError {
    /// A combinator referenced a name outside the form's universe.
    #[error("field '{name}' is not in the form's field-name universe")]
    UnknownField { name: String },
}

/// The set of legal field names for one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUniverse {
    names: BTreeSet<String>,
}

impl FieldUniverse {
    /// Build a universe from the form's legal field names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldUniverse {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Validate a field name, returning it unchanged when legal.
    pub fn ensure<'a>(&self, name: &'a str) -> Result<&'a str, FormDefError> {
        if self.names.contains(name) {
            Ok(name)
        } else {
            Err(FormDefError::UnknownField {
                name: name.to_string(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_accepts_known_names() {
        let u = FieldUniverse::new(["username", "password"]);
        assert_eq!(u.ensure("username"), Ok("username"));
        assert!(u.contains("password"));
    }

    #[test]
    fn ensure_rejects_unknown_names() {
        let u = FieldUniverse::new(["username"]);
        assert_eq!(
            u.ensure("user_name"),
            Err(FormDefError::UnknownField {
                name: "user_name".to_string()
            })
        );
    }

    #[test]
    fn unknown_field_error_names_the_field() {
        let err = FormDefError::UnknownField {
            name: "gold".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "field 'gold' is not in the form's field-name universe"
        );
    }
}
