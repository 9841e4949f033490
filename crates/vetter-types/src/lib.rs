//! vetter-types: pure data types shared by the engine and its front ends.
//!
//! - **Option names**: long and short spellings of every raw rule option
//! - **Error payloads**: the shapes filed into an error map
//! - **Outcome**: passed, or rejected with an error map

mod errors;
mod options;
mod outcome;

pub use errors::{ErrorEntry, ErrorMap, ErrorPayload, Redirection};
pub use options::{RedirectionOption, RuleOption};
pub use outcome::Outcome;

/// Output key for errors not attributed to a single field.
pub const GENERIC_ERROR_KEY: &str = "_error";

/// Message filed under [`GENERIC_ERROR_KEY`] when a run has no rules at all.
pub const NO_VALIDATIONS_MESSAGE: &str = "No validations setup, cannot continue.";
