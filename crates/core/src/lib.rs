//! formwork-core: data model for the formwork form-validation engine.
//!
//! Holds everything that is pure data and algebra: field paths, the
//! path-keyed error set, the tri-state branch outcome with its combine
//! rules, and the projection to the wire-format response. The combinator
//! engine that produces these values lives in `formwork-engine`.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`FieldPath`] -- location of a field within a nested document
//! - [`FieldErrors`] -- accumulated per-field validation errors
//! - [`Outcome`] -- branch result (parse failure / invalid / success)
//! - [`ParseError`] -- structural failure site and message
//! - [`FormResponse`] -- the three-slot wire shape

pub mod field_errors;
pub mod outcome;
pub mod path;
pub mod response;

pub use field_errors::FieldErrors;
pub use outcome::{Outcome, ParseError};
pub use path::FieldPath;
pub use response::{FormResponse, ParseErrorBody};
