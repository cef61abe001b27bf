//! End-to-end form execution.
//!
//! Phase 1 evaluates the parser against the input document at the root
//! path, accumulating per-field errors. Phase 2 -- the caller-supplied
//! cross-field callback -- runs only when phase 1 succeeded across
//! every field.

use crate::parser::Parser;
use formwork_core::{FieldErrors, FieldPath, Outcome};
use std::future::Future;

/// Outcome of the caller's second-pass (cross-field) validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FormResult<R> {
    /// Cross-field validation rejected the record; errors are reported
    /// through the same `field_errors` channel as first-pass failures.
    Failed(FieldErrors),
    /// The final result of the form.
    Succeeded(R),
}

/// Run one full parse: evaluate `parser` against `input`, then hand the
/// extracted record to `on_success` for cross-field validation.
///
/// The callback is never invoked when phase 1 produced a structural or
/// validation failure; those outcomes are returned unchanged.
pub async fn run_form<T, R, F, Fut>(
    parser: &Parser<T>,
    input: &serde_json::Value,
    on_success: F,
) -> Outcome<R>
where
    T: Send + 'static,
    F: FnOnce(T) -> Fut,
    Fut: Future<Output = FormResult<R>>,
{
    match parser.eval(input, FieldPath::root()).await {
        Outcome::ParseFailed(e) => Outcome::ParseFailed(e),
        Outcome::Invalid(errs) => Outcome::Invalid(errs),
        Outcome::Success(record) => match on_success(record).await {
            FormResult::Failed(errs) => Outcome::Invalid(errs),
            FormResult::Succeeded(result) => Outcome::Success(result),
        },
    }
}

/// Run a form that has no cross-field pass: the extracted record is the
/// final result.
pub async fn run_form_simple<T>(parser: &Parser<T>, input: &serde_json::Value) -> Outcome<T>
where
    T: Send + 'static,
{
    run_form(parser, input, |record| async move {
        FormResult::Succeeded(record)
    })
    .await
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
