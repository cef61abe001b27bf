//! Accumulated per-field validation errors.
//!
//! A `FieldErrors` maps a non-empty field path to an arbitrary
//! JSON-serializable error payload. Sets start as singletons at the
//! point a check fails and grow only through [`FieldErrors::merge`];
//! merging never drops an entry that exists on only one side.

use crate::path::FieldPath;
use std::collections::BTreeMap;

/// A set of validation errors keyed by field path.
///
/// Backed by a `BTreeMap` so iteration (and thus serialization) order is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    entries: BTreeMap<FieldPath, serde_json::Value>,
}

impl FieldErrors {
    /// An empty error set.
    pub fn new() -> Self {
        FieldErrors::default()
    }

    /// Build a one-entry set.
    ///
    /// `path` must be non-empty: a validation error is always localized
    /// to at least one field. Engine call sites always extend the path
    /// before recording an error, so this is enforced with a debug
    /// assertion rather than a fallible constructor.
    pub fn singleton(path: FieldPath, error: serde_json::Value) -> Self {
        debug_assert!(!path.is_root(), "validation error recorded at root path");
        let mut entries = BTreeMap::new();
        entries.insert(path, error);
        FieldErrors { entries }
    }

    /// Union of both sets, keyed by path.
    ///
    /// Every key present in only one side is preserved. When both sides
    /// carry an entry for the same path the left (`self`) entry wins --
    /// the first-recorded error for a field is the one reported.
    pub fn merge(mut self, other: FieldErrors) -> FieldErrors {
        for (path, error) in other.entries {
            self.entries.entry(path).or_insert(error);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up the error recorded for a path.
    pub fn get(&self, path: &FieldPath) -> Option<&serde_json::Value> {
        self.entries.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &serde_json::Value)> {
        self.entries.iter()
    }

    /// Flatten into the wire shape: rendered dotted path -> payload.
    pub fn into_rendered(self) -> BTreeMap<String, serde_json::Value> {
        self.entries
            .into_iter()
            .map(|(path, error)| (path.render(), error))
            .collect()
    }
}

impl IntoIterator for FieldErrors {
    type Item = (FieldPath, serde_json::Value);
    type IntoIter = std::collections::btree_map::IntoIter<FieldPath, serde_json::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
