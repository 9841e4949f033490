//! Trace lines for callers who want to watch a run.
//!
//! Every event also goes to `tracing`. The formatted line is only built when
//! a [`TraceLogger`] was supplied:
//!
//! ```text
//! [validation-start    ] -- [ ] is_empty(..."") // Email cannot be empty
//! [validation-result   ] -- [✗] is_empty(...) = true // Email cannot be empty
//! [validation-skipped  ] -- `email` Skipping, an earlier rule for this field was last. // Email is not valid
//! [validation-invalid  ] -- `token` Invalid or server side validator. // Token is not valid
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::rule::RuleSpec;

/// Width the event tag is padded to.
const TAG_WIDTH: usize = 20;

/// Receives one formatted trace line per event.
pub trait TraceLogger: Send + Sync {
    fn log(&self, line: &str);
}

impl<F> TraceLogger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, line: &str) {
        self(line)
    }
}

/// Why a rule was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// An earlier `last` rule of the same field failed.
    Field,
    /// An earlier `lastAll` rule failed.
    Run,
    /// The rule settled after the run was stopped; its result is dropped.
    Discarded,
}

impl SkipReason {
    fn describe(self) -> &'static str {
        match self {
            SkipReason::Field => "Skipping, an earlier rule for this field was last.",
            SkipReason::Run => "Skipping, an earlier rule was lastAll.",
            SkipReason::Discarded => "Discarding result, the run was stopped while this rule ran.",
        }
    }
}

/// Emits trace events for one engine.
#[derive(Clone, Default)]
pub struct Tracer {
    logger: Option<Arc<dyn TraceLogger>>,
    redact_values: bool,
}

impl Tracer {
    pub fn new(logger: Option<Arc<dyn TraceLogger>>, redact_values: bool) -> Self {
        Self {
            logger,
            redact_values,
        }
    }

    fn emit(&self, tag: &str, body: std::fmt::Arguments<'_>) {
        if let Some(logger) = &self.logger {
            logger.log(&format!("[{tag:<width$}] -- {body}", width = TAG_WIDTH));
        }
    }

    pub fn start(&self, rule: &RuleSpec, value: &Value, siblings: Option<&Value>) {
        tracing::debug!(
            field = %rule.field,
            predicate = rule.display_name(),
            wait = rule.wait,
            "rule start"
        );
        let args = if self.redact_values {
            String::new()
        } else {
            match siblings {
                Some(record) => format!("{value}, {record}"),
                None => value.to_string(),
            }
        };
        let wait = if rule.wait { " (wait)" } else { "" };
        self.emit(
            "validation-start",
            format_args!(
                "[ ] {}(...{args}){wait} // {}",
                rule.display_name(),
                rule.message_template()
            ),
        );
    }

    pub fn result(&self, rule: &RuleSpec, result: &Value, passed: bool) {
        tracing::debug!(
            field = %rule.field,
            predicate = rule.display_name(),
            passed,
            "rule result"
        );
        let mark = if passed { '✓' } else { '✗' };
        self.emit(
            "validation-result",
            format_args!(
                "[{mark}] {}(...) = {result} // {}",
                rule.display_name(),
                rule.message_template()
            ),
        );
    }

    pub fn skipped(&self, rule: &RuleSpec, reason: SkipReason) {
        tracing::debug!(field = %rule.field, ?reason, "rule skipped");
        self.emit(
            "validation-skipped",
            format_args!(
                "`{}` {} // {}",
                rule.field,
                reason.describe(),
                rule.message_template()
            ),
        );
    }

    pub fn invalid(&self, rule: &RuleSpec) {
        tracing::info!(
            field = %rule.field,
            predicate = rule.predicate_name.as_deref().unwrap_or("-"),
            "rule has no runnable predicate"
        );
        self.emit(
            "validation-invalid",
            format_args!(
                "`{}` Invalid or server side validator. // {}",
                rule.field,
                rule.message_template()
            ),
        );
    }
}

impl std::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracer")
            .field("logger", &self.logger.is_some())
            .field("redact_values", &self.redact_values)
            .finish()
    }
}
