//! The asynchronous checker seam.
//!
//! A [`Check`] takes the decoded value of a field and either rejects it
//! with a JSON-serializable domain error or transforms it into the
//! branch's result. Checkers may do blocking or asynchronous work
//! (uniqueness lookups against a database, say); whatever resources
//! they touch are their own business, captured by closure. Each
//! invocation runs to completion before its branch outcome is produced;
//! the engine never races or cancels a checker.

use async_trait::async_trait;
use std::future::Future;

/// Caller-supplied asynchronous domain check.
///
/// `Err` carries an arbitrary JSON-serializable error payload which the
/// engine records against the field's path.
#[async_trait]
pub trait Check<A, B>: Send + Sync
where
    A: Send + 'static,
{
    async fn check(&self, input: A) -> Result<B, serde_json::Value>;
}

// ──────────────────────────────────────────────
// Closure adapter
// ──────────────────────────────────────────────

/// A [`Check`] built from an async closure. See [`check_fn`].
pub struct FnCheck<F> {
    f: F,
}

/// Wrap an async closure as a [`Check`].
///
/// ```ignore
/// let non_empty = check_fn(|s: String| async move {
///     if s.is_empty() {
///         Err(serde_json::json!("This field cannot be empty."))
///     } else {
///         Ok(s)
///     }
/// });
/// ```
pub fn check_fn<A, B, F, Fut>(f: F) -> FnCheck<F>
where
    A: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync,
    Fut: Future<Output = Result<B, serde_json::Value>> + Send,
{
    FnCheck { f }
}

#[async_trait]
impl<A, B, F, Fut> Check<A, B> for FnCheck<F>
where
    A: Send + 'static,
    B: Send,
    F: Fn(A) -> Fut + Send + Sync,
    Fut: Future<Output = Result<B, serde_json::Value>> + Send,
{
    async fn check(&self, input: A) -> Result<B, serde_json::Value> {
        (self.f)(input).await
    }
}

// ──────────────────────────────────────────────
// Identity check
// ──────────────────────────────────────────────

/// The identity check: always succeeds with the decoded value.
///
/// This is what the checker-less field extractor runs, so a field with
/// no domain rule still flows through the same branch machinery.
pub struct Pass;

/// Construct the identity check.
pub fn pass() -> Pass {
    Pass
}

#[async_trait]
impl<A> Check<A, A> for Pass
where
    A: Send + 'static,
{
    async fn check(&self, input: A) -> Result<A, serde_json::Value> {
        Ok(input)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
