//! formwork-engine: applicative form-parsing combinators over JSON.
//!
//! Parses a JSON document (a `serde_json::Value`) into a strongly-shaped
//! result while collecting validation errors per field, so a request
//! handler can report every invalid field back to the client in one
//! round trip.
//!
//! The pipeline has two phases. Phase 1 is the structural parse plus
//! per-field domain checks, built from combinators ([`field`],
//! [`sub_object`], [`raw`], [`Parser::zip_with`], [`Parser::or`],
//! [`Parser::with_check`]); sibling branches evaluate independently, so
//! every failing field surfaces in one pass. Phase 2 is a caller-supplied
//! cross-field callback, invoked by [`run_form`] only when phase 1
//! succeeded across every field.
//!
//! ```ignore
//! let u = FieldUniverse::new(["username", "password"]);
//! let non_empty = || check_fn(|s: String| async move {
//!     if s.is_empty() { Err(json!("This field cannot be empty.")) } else { Ok(s) }
//! });
//! let login = field::<String, _, _>(&u, "username", non_empty())?
//!     .zip_with(field::<String, _, _>(&u, "password", non_empty())?, |username, password| {
//!         LoginRequest { username, password }
//!     });
//!
//! let outcome = run_form_simple(&login, &payload).await;
//! let response = FormResponse::from_outcome(outcome)?;
//! ```

pub mod check;
pub mod decode;
pub mod parser;
pub mod runner;
pub mod universe;

pub use check::{check_fn, pass, Check, FnCheck, Pass};
pub use decode::{json_type_name, DecodeError, FromValue};
pub use parser::{field, field_raw, raw, sub_object, BoxFuture, Parser};
pub use runner::{run_form, run_form_simple, FormResult};
pub use universe::{FieldUniverse, FormDefError};

// Re-export the data model so callers need only one crate.
pub use formwork_core::{FieldErrors, FieldPath, FormResponse, Outcome, ParseError, ParseErrorBody};
