//! Rule normalization: raw rule objects into canonical [`RuleSpec`]s.
//!
//! A raw rule is a JSON object whose options may be spelled long or short
//! (see [`RuleOption`]). Normalization never fails. Anything malformed
//! degrades to a missing predicate, which the runner reports and skips.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use vetter_types::{RedirectionOption, RuleOption};

use crate::predicate::{Predicate, PredicateRegistry};
use crate::value::is_truthy;

/// An un-interpolated redirection link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectionTemplate {
    pub href: String,
    pub title: String,
}

/// One rule, resolved and ready to run.
#[derive(Clone)]
pub struct RuleSpec {
    /// Field the rule is declared under.
    pub field: String,
    /// Predicate name as written in the raw rule.
    pub predicate_name: Option<String>,
    /// Resolved predicate; `None` makes the rule inert.
    pub predicate: Option<Arc<dyn Predicate>>,
    pub expect: Option<Value>,
    pub message: Option<String>,
    pub cause_generic_error: bool,
    /// Record key to read the input from, instead of `field`.
    pub key: Option<String>,
    pub wait: bool,
    pub include_sibling_data: bool,
    pub last: bool,
    pub last_all: bool,
    pub redirection: Option<Vec<RedirectionTemplate>>,
}

impl RuleSpec {
    /// A rule that never runs.
    pub fn inert(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            predicate_name: None,
            predicate: None,
            expect: None,
            message: None,
            cause_generic_error: false,
            key: None,
            wait: false,
            include_sibling_data: false,
            last: false,
            last_all: false,
            redirection: None,
        }
    }

    /// Expected predicate result, `false` unless the rule says otherwise.
    pub fn expected(&self) -> Value {
        self.expect.clone().unwrap_or(Value::Bool(false))
    }

    /// Record key the input value is read from.
    pub fn input_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.field)
    }

    /// The predicate's first argument: the record value, or `""` when missing or null.
    pub fn input_value(&self, record: &Value) -> Value {
        record
            .get(self.input_key())
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()))
    }

    /// Name for trace lines.
    pub fn display_name(&self) -> &str {
        self.predicate
            .as_ref()
            .map(|p| p.name())
            .or(self.predicate_name.as_deref())
            .unwrap_or("anonymous")
    }

    pub fn message_template(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    pub fn is_runnable(&self) -> bool {
        self.predicate.is_some()
    }
}

impl fmt::Debug for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSpec")
            .field("field", &self.field)
            .field("predicate", &self.display_name())
            .field("runnable", &self.is_runnable())
            .field("expect", &self.expect)
            .field("message", &self.message)
            .field("cause_generic_error", &self.cause_generic_error)
            .field("key", &self.key)
            .field("wait", &self.wait)
            .field("include_sibling_data", &self.include_sibling_data)
            .field("last", &self.last)
            .field("last_all", &self.last_all)
            .field("redirection", &self.redirection)
            .finish()
    }
}

/// The rules declared for one field, in declaration order.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub field: String,
    pub rules: Vec<RuleSpec>,
}

/// Normalize a whole spec object. Returns `None` when there is nothing to
/// validate: the spec is missing, not an object, or an empty object.
pub fn normalize_spec(spec: &Value, registry: &PredicateRegistry) -> Option<Vec<FieldRules>> {
    let fields = spec.as_object().filter(|m| !m.is_empty())?;
    Some(
        fields
            .iter()
            .map(|(field, raw)| FieldRules {
                field: field.clone(),
                rules: normalize_field(field, raw, registry),
            })
            .collect(),
    )
}

/// A field's rules may be one object or an array of them.
fn normalize_field(field: &str, raw: &Value, registry: &PredicateRegistry) -> Vec<RuleSpec> {
    match raw {
        Value::Null => Vec::new(),
        Value::Array(rules) => rules
            .iter()
            .map(|rule| normalize_rule(field, rule, registry))
            .collect(),
        single => vec![normalize_rule(field, single, registry)],
    }
}

/// Normalize one raw rule declared under `field`.
pub fn normalize_rule(field: &str, raw: &Value, registry: &PredicateRegistry) -> RuleSpec {
    let Some(raw) = raw.as_object() else {
        return RuleSpec::inert(field);
    };

    let predicate_name = string_option(raw, RuleOption::Validation);
    let predicate = predicate_name.as_deref().and_then(|name| registry.get(name));

    RuleSpec {
        field: field.to_string(),
        predicate_name,
        predicate,
        expect: option(raw, RuleOption::Expect).cloned(),
        message: string_option(raw, RuleOption::Message),
        cause_generic_error: flag(raw, RuleOption::CauseGenericError),
        key: string_option(raw, RuleOption::Key),
        wait: flag(raw, RuleOption::Wait),
        include_sibling_data: flag(raw, RuleOption::Data),
        last: flag(raw, RuleOption::Last),
        last_all: flag(raw, RuleOption::LastAll),
        redirection: option(raw, RuleOption::Redirection).and_then(redirections),
    }
}

/// First non-null spelling, long before short.
fn option(raw: &Map<String, Value>, option: RuleOption) -> Option<&Value> {
    lookup(raw, option.spellings())
}

fn lookup<'a>(raw: &'a Map<String, Value>, spellings: [&str; 2]) -> Option<&'a Value> {
    spellings
        .into_iter()
        .find_map(|name| raw.get(name).filter(|v| !v.is_null()))
}

fn string_option(raw: &Map<String, Value>, option_name: RuleOption) -> Option<String> {
    option(raw, option_name)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn flag(raw: &Map<String, Value>, option_name: RuleOption) -> bool {
    option(raw, option_name).is_some_and(is_truthy)
}

/// One object or an array of objects; anything else drops the option.
fn redirections(raw: &Value) -> Option<Vec<RedirectionTemplate>> {
    let entries: Vec<&Map<String, Value>> = match raw {
        Value::Object(entry) => vec![entry],
        Value::Array(entries) => entries.iter().filter_map(Value::as_object).collect(),
        _ => return None,
    };
    let templates: Vec<_> = entries
        .into_iter()
        .map(|entry| RedirectionTemplate {
            href: link_part(entry, RedirectionOption::Href),
            title: link_part(entry, RedirectionOption::Title),
        })
        .collect();
    (!templates.is_empty()).then_some(templates)
}

fn link_part(entry: &Map<String, Value>, part: RedirectionOption) -> String {
    lookup(entry, part.spellings())
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
