//! Name lookup for the `validation` option of a raw rule.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use super::{AsyncFnPredicate, FnPredicate, Predicate, register_builtins};
use crate::error::PredicateError;

/// Predicates keyed by the name rules refer to them with.
#[derive(Default)]
pub struct PredicateRegistry {
    predicates: HashMap<String, Arc<dyn Predicate>>,
}

impl PredicateRegistry {
    /// No predicates at all; every named rule will be inert.
    pub fn new() -> Self {
        Self::default()
    }

    /// The string checks listed by `vetter predicates`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    /// Add `predicate` under its own name, replacing any previous holder of that name.
    pub fn register(&mut self, predicate: impl Predicate + 'static) {
        let name = predicate.name().to_string();
        self.predicates.insert(name, Arc::new(predicate));
    }

    /// Add a shared predicate, e.g. one also held by another registry.
    pub fn register_arc(&mut self, predicate: Arc<dyn Predicate>) {
        let name = predicate.name().to_string();
        self.predicates.insert(name, predicate);
    }

    /// Wrap a sync closure as a predicate.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(&Value, Option<&Value>) -> Result<Value, PredicateError> + Send + Sync + 'static,
    {
        self.register(FnPredicate::new(name, func));
    }

    /// Wrap a closure returning a future as a predicate.
    pub fn register_async<F, Fut>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(Value, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, PredicateError>> + Send + 'static,
    {
        self.register(AsyncFnPredicate::new(name, func));
    }

    /// Resolve a rule's `validation` name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Predicate>> {
        self.predicates.get(name).cloned()
    }

    /// Whether rules naming `name` will run.
    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.predicates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl std::fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
