//! `:placeholder:` interpolation for messages and redirection links.
//!
//! A token names a record key. It is replaced by that key's value when the
//! value is present and truthy; otherwise the token stays in the output
//! verbatim, so a half-filled template is still readable.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::value::{display_value, is_truthy};

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([A-Za-z0-9_]+):").expect("token pattern is valid"));

/// Fill `:name:` tokens in `template` from `record`.
pub fn interpolate(template: &str, record: &Value) -> String {
    TOKEN
        .replace_all(template, |caps: &Captures<'_>| {
            match record.get(&caps[1]).filter(|v| is_truthy(v)) {
                Some(value) => display_value(value),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
