//! Outcome of a validation run.

use serde::{Deserialize, Serialize};

use crate::{ErrorMap, ErrorPayload, GENERIC_ERROR_KEY, NO_VALIDATIONS_MESSAGE};

/// Passed, or rejected with everything that was filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "errors", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Rejected(ErrorMap),
}

impl Outcome {
    /// Passed when nothing was filed, rejected otherwise.
    pub fn from_errors(errors: ErrorMap) -> Self {
        if errors.is_empty() {
            Outcome::Passed
        } else {
            Outcome::Rejected(errors)
        }
    }

    /// The rejection used when a run has no rules.
    pub fn no_validations() -> Self {
        let mut errors = ErrorMap::new();
        errors.file(
            GENERIC_ERROR_KEY,
            ErrorPayload::Message(NO_VALIDATIONS_MESSAGE.to_string()),
        );
        Outcome::Rejected(errors)
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn errors(&self) -> Option<&ErrorMap> {
        match self {
            Outcome::Passed => None,
            Outcome::Rejected(errors) => Some(errors),
        }
    }

    pub fn into_result(self) -> Result<(), ErrorMap> {
        match self {
            Outcome::Passed => Ok(()),
            Outcome::Rejected(errors) => Err(errors),
        }
    }
}
