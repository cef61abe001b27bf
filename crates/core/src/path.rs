//! Field paths -- the location of a field within a nested document.
//!
//! A path is built incrementally as the parser descends into sub-objects
//! and is captured into errors at the point of failure. Paths are cheap
//! to clone: segments are reference-counted strings shared between the
//! original and every extension.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Ordered sequence of field-name segments.
///
/// The root path is empty and renders as the empty string. A path
/// attached to a validation error is never empty (errors are always
/// localized to at least one field); structural parse errors may sit at
/// the root when the whole document has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldPath {
    segments: Vec<Arc<str>>,
}

impl FieldPath {
    /// The empty path, representing the document root.
    pub fn root() -> Self {
        FieldPath::default()
    }

    /// Build a path directly from segments. Mostly useful in tests.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FieldPath {
            segments: segments.into_iter().map(|s| Arc::from(s.as_ref())).collect(),
        }
    }

    /// True for the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Return a new path with `segment` appended. The original is untouched.
    pub fn extend(&self, segment: &str) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.push(Arc::from(segment));
        FieldPath { segments }
    }

    /// Render as a dotted string: `a.b.c`. The root renders as `""`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Iterate over the segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.as_ref())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.render())
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_empty() {
        assert_eq!(FieldPath::root().render(), "");
        assert!(FieldPath::root().is_root());
    }

    #[test]
    fn render_joins_with_dots() {
        let path = FieldPath::from_segments(["a", "b", "c"]);
        assert_eq!(path.render(), "a.b.c");
    }

    #[test]
    fn single_segment_renders_bare() {
        let path = FieldPath::root().extend("username");
        assert_eq!(path.render(), "username");
    }

    #[test]
    fn extend_does_not_mutate_original() {
        let base = FieldPath::root().extend("player");
        let child = base.extend("gold");
        assert_eq!(base.render(), "player");
        assert_eq!(child.render(), "player.gold");
    }

    #[test]
    fn paths_order_lexicographically() {
        let a = FieldPath::from_segments(["a"]);
        let ab = FieldPath::from_segments(["a", "b"]);
        let b = FieldPath::from_segments(["b"]);
        assert!(a < ab);
        assert!(ab < b);
    }
}
