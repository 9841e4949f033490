//! Character-level string checks.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::PredicateError;
use crate::predicate::{Predicate, value_text};

/// A named test over the text form of a value.
#[derive(Clone, Copy)]
pub struct TextCheck {
    name: &'static str,
    test: fn(&str) -> bool,
}

pub const TEXT_CHECKS: [TextCheck; 8] = [
    TextCheck { name: "is_empty", test: is_empty },
    TextCheck { name: "is_lowercase", test: is_lowercase },
    TextCheck { name: "is_uppercase", test: is_uppercase },
    TextCheck { name: "is_alphanumeric", test: is_alphanumeric },
    TextCheck { name: "is_numeric", test: is_numeric },
    TextCheck { name: "has_digit", test: has_digit },
    TextCheck { name: "has_lowercase", test: has_lowercase },
    TextCheck { name: "has_uppercase", test: has_uppercase },
];

#[async_trait]
impl Predicate for TextCheck {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self, value: &Value, _siblings: Option<&Value>) -> Result<Value, PredicateError> {
        Ok(Value::Bool((self.test)(&value_text(value))))
    }
}

fn is_empty(s: &str) -> bool {
    s.is_empty()
}

/// Unchanged by lowercasing; digits and punctuation don't count against it.
fn is_lowercase(s: &str) -> bool {
    s == s.to_lowercase()
}

fn is_uppercase(s: &str) -> bool {
    s == s.to_uppercase()
}

fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Optional sign followed by at least one ASCII digit.
fn is_numeric(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

fn has_lowercase(s: &str) -> bool {
    s.chars().any(char::is_lowercase)
}

fn has_uppercase(s: &str) -> bool {
    s.chars().any(char::is_uppercase)
}
