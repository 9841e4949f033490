//! Predicates: the opaque checks a rule runs against a field value.
//!
//! The engine never knows what a predicate tests. It hands over the field
//! value (and the whole record when a rule asks for it) and compares what
//! comes back with the rule's expectation.

pub mod builtin;
mod registry;

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::PredicateError;

pub use builtin::register_builtins;
pub use registry::PredicateRegistry;

/// A named check over a field value.
///
/// Sync and async checks share this one async contract; a sync check simply
/// completes on first poll.
#[async_trait]
pub trait Predicate: Send + Sync {
    /// Name used in rule specs and trace lines.
    fn name(&self) -> &str;

    /// Run the check. `siblings` is the whole record when the rule asked for it.
    async fn check(&self, value: &Value, siblings: Option<&Value>) -> Result<Value, PredicateError>;
}

/// A predicate backed by a synchronous closure.
pub struct FnPredicate<F> {
    name: String,
    func: F,
}

impl<F> FnPredicate<F>
where
    F: Fn(&Value, Option<&Value>) -> Result<Value, PredicateError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

#[async_trait]
impl<F> Predicate for FnPredicate<F>
where
    F: Fn(&Value, Option<&Value>) -> Result<Value, PredicateError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, value: &Value, siblings: Option<&Value>) -> Result<Value, PredicateError> {
        (self.func)(value, siblings)
    }
}

/// A predicate backed by a closure returning a future.
///
/// The closure receives owned copies so the future can outlive the call.
pub struct AsyncFnPredicate<F> {
    name: String,
    func: F,
}

impl<F, Fut> AsyncFnPredicate<F>
where
    F: Fn(Value, Option<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, PredicateError>> + Send + 'static,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

#[async_trait]
impl<F, Fut> Predicate for AsyncFnPredicate<F>
where
    F: Fn(Value, Option<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, PredicateError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, value: &Value, siblings: Option<&Value>) -> Result<Value, PredicateError> {
        (self.func)(value.clone(), siblings.cloned()).await
    }
}

/// Text a string predicate looks at: strings as-is, `null` as empty,
/// everything else in its JSON form.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
