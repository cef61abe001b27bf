//! Branch outcomes and the rules for combining them.
//!
//! Every independently-evaluated piece of a form parser (a branch)
//! produces an [`Outcome`]. Combining two branches follows a fixed
//! table: a structural parse failure absorbs everything, two validation
//! failures merge their error sets, and two successes apply the
//! caller's combining function. Getting this table right is what makes
//! "show all errors at once" hold.

use crate::field_errors::FieldErrors;
use crate::path::FieldPath;
use std::fmt;

// ──────────────────────────────────────────────
// ParseError
// ──────────────────────────────────────────────

/// A structural parse failure: the input did not have the expected
/// shape or type at `path`. Fatal for the whole parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Where decoding broke. May be the root when the whole document
    /// has the wrong shape.
    pub path: FieldPath,
    /// Human-readable description of the mismatch.
    pub message: String,
}

impl ParseError {
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        ParseError {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for ParseError {}

// ──────────────────────────────────────────────
// Outcome
// ──────────────────────────────────────────────

/// The tri-state result of evaluating one parsing branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The input shape was wrong. Absorbing: once produced, it survives
    /// any further combination.
    ParseFailed(ParseError),
    /// The shape was right but one or more domain checks rejected their
    /// values. Never carries an empty error set.
    Invalid(FieldErrors),
    /// The branch produced a value.
    Success(T),
}

impl<T> Outcome<T> {
    /// Shorthand for a parse failure at `path`.
    pub fn parse_failed(path: FieldPath, message: impl Into<String>) -> Self {
        Outcome::ParseFailed(ParseError::new(path, message))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Map the success value, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::ParseFailed(e) => Outcome::ParseFailed(e),
            Outcome::Invalid(errs) => Outcome::Invalid(errs),
            Outcome::Success(value) => Outcome::Success(f(value)),
        }
    }

    /// Combine two sibling branch outcomes.
    ///
    /// The table, in order:
    /// - a parse failure on either side absorbs the combination; when
    ///   both sides parse-failed, the left failure is kept;
    /// - two validation failures merge their error sets (this is the
    ///   accumulation that surfaces every failing field in one pass);
    /// - a validation failure paired with a success keeps the failure;
    /// - two successes apply `f` to both values.
    pub fn combine<U, V>(self, other: Outcome<U>, f: impl FnOnce(T, U) -> V) -> Outcome<V> {
        match (self, other) {
            (Outcome::ParseFailed(e), _) => Outcome::ParseFailed(e),
            (_, Outcome::ParseFailed(e)) => Outcome::ParseFailed(e),
            (Outcome::Invalid(e0), Outcome::Invalid(e1)) => Outcome::Invalid(e0.merge(e1)),
            (Outcome::Invalid(e), Outcome::Success(_)) => Outcome::Invalid(e),
            (Outcome::Success(_), Outcome::Invalid(e)) => Outcome::Invalid(e),
            (Outcome::Success(a), Outcome::Success(b)) => Outcome::Success(f(a, b)),
        }
    }

    /// Choice between two alternative outcomes for the same branch.
    ///
    /// The left side wins unless it is a parse failure, in which case
    /// the right side is reported -- so when both alternatives
    /// parse-failed, the right-hand failure is the one surfaced.
    pub fn prefer(self, other: Outcome<T>) -> Outcome<T> {
        match self {
            Outcome::ParseFailed(_) => other,
            kept => kept,
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> FieldPath {
        FieldPath::from_segments(s.split('.'))
    }

    fn invalid(field: &str, msg: &str) -> Outcome<i64> {
        Outcome::Invalid(FieldErrors::singleton(path(field), json!(msg)))
    }

    #[test]
    fn parse_failure_absorbs_everything() {
        let fail = || Outcome::<i64>::parse_failed(path("a"), "expected string");

        let combined = fail().combine(Outcome::Success(1), |a, b| a + b);
        assert!(matches!(combined, Outcome::ParseFailed(_)));

        let combined = Outcome::Success(1).combine(fail(), |a, b| a + b);
        assert!(matches!(combined, Outcome::ParseFailed(_)));

        let combined = invalid("b", "bad").combine(fail(), |a, b| a + b);
        assert!(matches!(combined, Outcome::ParseFailed(_)));
    }

    #[test]
    fn double_parse_failure_keeps_left() {
        let left = Outcome::<i64>::parse_failed(path("a"), "left");
        let right = Outcome::<i64>::parse_failed(path("b"), "right");
        match left.combine(right, |a, b| a + b) {
            Outcome::ParseFailed(e) => assert_eq!(e.message, "left"),
            other => panic!("expected parse failure, got {:?}", other),
        }
    }

    #[test]
    fn validation_failures_accumulate() {
        let combined = invalid("username", "empty").combine(invalid("password", "empty"), |a, b| a + b);
        match combined {
            Outcome::Invalid(errs) => {
                assert_eq!(errs.len(), 2);
                assert!(errs.get(&path("username")).is_some());
                assert!(errs.get(&path("password")).is_some());
            }
            other => panic!("expected invalid, got {:?}", other),
        }
    }

    #[test]
    fn validation_failure_beats_success() {
        let combined = invalid("username", "empty").combine(Outcome::Success(1), |a, b| a + b);
        assert!(matches!(combined, Outcome::Invalid(_)));

        let combined = Outcome::Success(1).combine(invalid("username", "empty"), |a, b| a + b);
        assert!(matches!(combined, Outcome::Invalid(_)));
    }

    #[test]
    fn successes_apply_combining_function() {
        let combined = Outcome::Success(2).combine(Outcome::Success(3), |a, b| a * b);
        assert_eq!(combined, Outcome::Success(6));
    }

    #[test]
    fn prefer_keeps_left_unless_parse_failed() {
        let kept = Outcome::Success(1).prefer(Outcome::Success(2));
        assert_eq!(kept, Outcome::Success(1));

        let kept = invalid("a", "bad").prefer(Outcome::Success(2));
        assert!(matches!(kept, Outcome::Invalid(_)));

        let kept = Outcome::<i64>::parse_failed(path("a"), "left")
            .prefer(Outcome::Success(2));
        assert_eq!(kept, Outcome::Success(2));
    }

    #[test]
    fn double_parse_failure_choice_reports_right() {
        let left = Outcome::<i64>::parse_failed(path("a"), "left");
        let right = Outcome::<i64>::parse_failed(path("b"), "right");
        match left.prefer(right) {
            Outcome::ParseFailed(e) => assert_eq!(e.message, "right"),
            other => panic!("expected parse failure, got {:?}", other),
        }
    }

    #[test]
    fn combine_is_order_insensitive_on_accumulation() {
        let ab = invalid("a", "bad").combine(invalid("b", "worse"), |a, b| a + b);
        let ba = invalid("b", "worse").combine(invalid("a", "bad"), |a, b| a + b);
        assert_eq!(ab, ba);
    }
}
