//! Control flow signals produced by a settled rule.
//!
//! A failing rule may end its field (`last`) or the whole run (`lastAll`).
//! Settling a rule yields one of these signals and the runner reacts to it.
//! Nothing here escapes the runner.

use vetter_types::ErrorPayload;

/// An error payload and the output key it is filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiledError {
    pub key: String,
    pub payload: ErrorPayload,
}

/// Control flow signal from settling one rule.
///
/// `Normal(None)` is a pass, `Normal(Some(_))` a failure that lets later
/// rules run. The stop variants always carry the error that caused them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleFlow {
    /// Keep going, with or without an error.
    Normal(Option<FiledError>),
    /// Skip the remaining rules of this field.
    FieldStop(FiledError),
    /// Skip the remaining rules of every field.
    RunStop(FiledError),
}

impl RuleFlow {
    /// A passing rule.
    pub fn passed() -> Self {
        RuleFlow::Normal(None)
    }

    /// A failing rule, escalated by its `last` / `lastAll` options.
    /// `lastAll` wins when both are set.
    pub fn failed(error: FiledError, last: bool, last_all: bool) -> Self {
        if last_all {
            RuleFlow::RunStop(error)
        } else if last {
            RuleFlow::FieldStop(error)
        } else {
            RuleFlow::Normal(Some(error))
        }
    }

    /// Check if the rule passed.
    pub fn is_passed(&self) -> bool {
        matches!(self, RuleFlow::Normal(None))
    }

    /// The error to file, if any.
    pub fn into_error(self) -> Option<FiledError> {
        match self {
            RuleFlow::Normal(error) => error,
            RuleFlow::FieldStop(error) | RuleFlow::RunStop(error) => Some(error),
        }
    }
}
