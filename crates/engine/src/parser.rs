//! Form parser construction and traversal.
//!
//! A [`Parser<T>`] is a reusable description of how to extract a `T`
//! from a JSON value at a given field path. Composition is applicative
//! only: composed parsers evaluate independently against the same input,
//! which is what lets validation errors from sibling branches accumulate
//! instead of short-circuiting at the first one.
//!
//! Structural inspection (object checks, key lookups, decoding) happens
//! synchronously when a branch is evaluated; only the caller-supplied
//! domain checkers are awaited. Every branch of a composition is always
//! evaluated -- checker effects on both sides of `zip_with`/`or` run
//! regardless of the other side's outcome.

use crate::check::{pass, Check};
use crate::decode::{json_type_name, FromValue};
use crate::universe::{FieldUniverse, FormDefError};
use formwork_core::{FieldErrors, FieldPath, Outcome};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by branch evaluation.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

type RunFn<T> = dyn Fn(&serde_json::Value, FieldPath) -> BoxFuture<Outcome<T>> + Send + Sync;

/// An already-settled branch outcome.
fn done<T: Send + 'static>(outcome: Outcome<T>) -> BoxFuture<Outcome<T>> {
    Box::pin(std::future::ready(outcome))
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

/// A reusable form parser producing values of type `T`.
///
/// Cheap to clone; a parser is built once by a form author and reused
/// across many invocations against different input documents.
pub struct Parser<T> {
    run: Arc<RunFn<T>>,
}

impl<T> std::fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T: Send + 'static> Parser<T> {
    fn from_fn<F>(f: F) -> Parser<T>
    where
        F: Fn(&serde_json::Value, FieldPath) -> BoxFuture<Outcome<T>> + Send + Sync + 'static,
    {
        Parser { run: Arc::new(f) }
    }

    /// Evaluate this parser against `value` at `path`.
    pub fn eval(&self, value: &serde_json::Value, path: FieldPath) -> BoxFuture<Outcome<T>> {
        (self.run)(value, path)
    }

    /// A parser that always succeeds with a copy of `value`.
    pub fn pure(value: T) -> Parser<T>
    where
        T: Clone + Sync,
    {
        Parser::from_fn(move |_value, _path| done(Outcome::Success(value.clone())))
    }

    /// A parser that never succeeds: a structural failure at the
    /// current path reading "no alternative matched". Identity for
    /// [`Parser::or`].
    pub fn empty() -> Parser<T> {
        Parser::from_fn(|_value, path| done(Outcome::parse_failed(path, "no alternative matched")))
    }

    /// Map the success value.
    pub fn map<U, F>(self, f: F) -> Parser<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Parser::from_fn(move |value, path| {
            let inner = self.eval(value, path);
            let f = Arc::clone(&f);
            Box::pin(async move { inner.await.map(|v| f(v)) })
        })
    }

    /// Evaluate `self` and `other` independently against the same value
    /// and path, then combine per the branch algebra: parse failures
    /// absorb, validation failures accumulate, and two successes are
    /// merged with `f`. Both sides are always evaluated.
    pub fn zip_with<U, V, F>(self, other: Parser<U>, f: F) -> Parser<V>
    where
        U: Send + 'static,
        V: Send + 'static,
        F: Fn(T, U) -> V + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Parser::from_fn(move |value, path| {
            let left = self.eval(value, path.clone());
            let right = other.eval(value, path);
            let f = Arc::clone(&f);
            Box::pin(async move { left.await.combine(right.await, |a, b| f(a, b)) })
        })
    }

    /// [`Parser::zip_with`] collecting both values into a tuple.
    pub fn zip<U>(self, other: Parser<U>) -> Parser<(T, U)>
    where
        U: Send + 'static,
    {
        self.zip_with(other, |a, b| (a, b))
    }

    /// Try `self`, falling back to `other`.
    ///
    /// Both alternatives are evaluated unconditionally (their checker
    /// effects always run); the left outcome wins unless it is a
    /// structural failure. When both sides fail structurally the
    /// right-hand failure is the one reported.
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        Parser::from_fn(move |value, path| {
            let left = self.eval(value, path.clone());
            let right = other.eval(value, path);
            Box::pin(async move { left.await.prefer(right.await) })
        })
    }

    /// Succeed with `None` where `self` fails structurally.
    pub fn optional(self) -> Parser<Option<T>>
    where
        T: Clone + Sync,
    {
        self.map(Some).or(Parser::pure(None))
    }

    /// Post-hoc check: on success of `self`, run `check`; a domain
    /// error is recorded against the current path extended with `name`.
    ///
    /// This is how a cross-field rule is pinned to one specific field
    /// (e.g. a password-confirmation mismatch reported on
    /// `password_confirmation` alone).
    pub fn with_check<U, C>(
        self,
        universe: &FieldUniverse,
        name: &str,
        check: C,
    ) -> Result<Parser<U>, FormDefError>
    where
        U: Send + 'static,
        C: Check<T, U> + 'static,
    {
        let name: Arc<str> = Arc::from(universe.ensure(name)?);
        let check = Arc::new(check);
        Ok(Parser::from_fn(move |value, path| {
            let error_path = path.extend(&name);
            let inner = self.eval(value, path);
            let check = Arc::clone(&check);
            Box::pin(async move {
                match inner.await {
                    Outcome::Success(v) => match check.check(v).await {
                        Ok(out) => Outcome::Success(out),
                        Err(err) => Outcome::Invalid(FieldErrors::singleton(error_path, err)),
                    },
                    Outcome::ParseFailed(e) => Outcome::ParseFailed(e),
                    Outcome::Invalid(errs) => Outcome::Invalid(errs),
                }
            })
        }))
    }
}

// ──────────────────────────────────────────────
// Leaf extractors
// ──────────────────────────────────────────────

/// Raw-value extractor: decode the value at the current path as `T`.
///
/// A decode failure is a structural failure at the current path
/// carrying the decode message.
pub fn raw<T>() -> Parser<T>
where
    T: FromValue + Send + 'static,
{
    Parser::from_fn(|value, path| match T::from_value(value) {
        Ok(decoded) => done(Outcome::Success(decoded)),
        Err(e) => done(Outcome::parse_failed(path, e.message)),
    })
}

/// Field extractor: require key `name` in the current object, decode
/// its value as `A`, then run the domain checker.
///
/// Failure modes, in order of detection:
/// - current value is not an object: structural failure at the current
///   (pre-extension) path;
/// - key absent: structural failure at the extended path;
/// - decode failure: structural failure at the extended path;
/// - checker rejection: validation failure recorded at the extended
///   path.
pub fn field<A, B, C>(
    universe: &FieldUniverse,
    name: &str,
    check: C,
) -> Result<Parser<B>, FormDefError>
where
    A: FromValue + Send + 'static,
    B: Send + 'static,
    C: Check<A, B> + 'static,
{
    let name: Arc<str> = Arc::from(universe.ensure(name)?);
    let check = Arc::new(check);
    Ok(Parser::from_fn(move |value, path| {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => {
                return done(Outcome::parse_failed(
                    path,
                    format!("expected object, encountered {}", json_type_name(value)),
                ))
            }
        };
        let field_path = path.extend(&name);
        let raw_value = match obj.get(name.as_ref()) {
            Some(raw_value) => raw_value,
            None => {
                return done(Outcome::parse_failed(
                    field_path,
                    format!("missing required field '{}'", name),
                ))
            }
        };
        let decoded = match A::from_value(raw_value) {
            Ok(decoded) => decoded,
            Err(e) => return done(Outcome::parse_failed(field_path, e.message)),
        };
        let check = Arc::clone(&check);
        Box::pin(async move {
            match check.check(decoded).await {
                Ok(out) => Outcome::Success(out),
                Err(err) => Outcome::Invalid(FieldErrors::singleton(field_path, err)),
            }
        })
    }))
}

/// Field extractor without a domain checker: structural decoding only.
pub fn field_raw<A>(universe: &FieldUniverse, name: &str) -> Result<Parser<A>, FormDefError>
where
    A: FromValue + Send + 'static,
{
    field::<A, A, _>(universe, name, pass())
}

/// Sub-object extractor: require key `name` to hold an object and
/// evaluate `inner` against it with the extended path.
///
/// The inner outcome propagates unchanged; errors inside are already
/// path-qualified by the recursive application of the same combinators.
pub fn sub_object<T>(
    universe: &FieldUniverse,
    name: &str,
    inner: Parser<T>,
) -> Result<Parser<T>, FormDefError>
where
    T: Send + 'static,
{
    let name: Arc<str> = Arc::from(universe.ensure(name)?);
    Ok(Parser::from_fn(move |value, path| {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => {
                return done(Outcome::parse_failed(
                    path,
                    format!("expected object, encountered {}", json_type_name(value)),
                ))
            }
        };
        let field_path = path.extend(&name);
        let nested = match obj.get(name.as_ref()) {
            Some(nested) => nested,
            None => {
                return done(Outcome::parse_failed(
                    field_path,
                    format!("missing required field '{}'", name),
                ))
            }
        };
        if !nested.is_object() {
            return done(Outcome::parse_failed(
                field_path,
                format!("expected object, encountered {}", json_type_name(nested)),
            ));
        }
        inner.eval(nested, field_path)
    }))
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
