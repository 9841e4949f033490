//! Error types for the engine.
//!
//! Failing rules are not errors: they land in the error map of a rejected
//! [`Outcome`](vetter_types::Outcome). The types here cover what aborts a run.

use thiserror::Error;

/// A predicate could not produce a result.
#[derive(Debug, Error)]
pub enum PredicateError {
    /// The predicate gave up with a message.
    #[error("{0}")]
    Failed(String),
    /// The predicate hit an underlying error.
    #[error(transparent)]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl PredicateError {
    pub fn failed(message: impl Into<String>) -> Self {
        PredicateError::Failed(message.into())
    }
}

/// Errors that abort a validation run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A predicate failed; the run is abandoned and nothing is aggregated.
    #[error("predicate `{predicate}` failed on field `{field}`: {source}")]
    Predicate {
        field: String,
        predicate: String,
        #[source]
        source: PredicateError,
    },
}
