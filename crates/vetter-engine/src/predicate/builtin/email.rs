//! is_email: loose address shape check.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

use crate::error::PredicateError;
use crate::predicate::{Predicate, value_text};

/// local@domain.tld, no whitespace, a dot somewhere after the `@`.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is valid")
});

pub struct IsEmail;

#[async_trait]
impl Predicate for IsEmail {
    fn name(&self) -> &str {
        "is_email"
    }

    async fn check(&self, value: &Value, _siblings: Option<&Value>) -> Result<Value, PredicateError> {
        Ok(Value::Bool(EMAIL.is_match(&value_text(value))))
    }
}
