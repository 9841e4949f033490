//! Settling a predicate result into a [`RuleFlow`].

use serde_json::Value;
use vetter_types::{ErrorPayload, GENERIC_ERROR_KEY, Redirection};

use crate::flow::{FiledError, RuleFlow};
use crate::rule::RuleSpec;
use crate::template::interpolate;
use crate::value::json_eq;

/// Compare `result` with the rule's expectation and build the flow signal.
///
/// Equality is structural over JSON: numbers compare by value and key order
/// in objects does not matter.
pub fn settle(rule: &RuleSpec, result: &Value, record: &Value) -> RuleFlow {
    if json_eq(result, &rule.expected()) {
        return RuleFlow::passed();
    }
    RuleFlow::failed(build_error(rule, record), rule.last, rule.last_all)
}

/// The error a failing rule files.
///
/// The output key is the declaring field, or the generic key; a `key`
/// override only changes where the input is read from.
pub fn build_error(rule: &RuleSpec, record: &Value) -> FiledError {
    let key = if rule.cause_generic_error {
        GENERIC_ERROR_KEY.to_string()
    } else {
        rule.field.clone()
    };

    let message = interpolate(rule.message_template(), record);
    let payload = match &rule.redirection {
        Some(links) => ErrorPayload::Linked {
            message,
            redirection: links
                .iter()
                .map(|link| Redirection {
                    href: interpolate(&link.href, record),
                    title: interpolate(&link.title, record),
                })
                .collect(),
        },
        None => ErrorPayload::Message(message),
    };

    FiledError { key, payload }
}
