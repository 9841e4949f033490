//! Result aggregation.
//!
//! Errors are filed in schedule order, not completion order, so an
//! interleaved run produces the same lists as a sequential one.

use vetter_types::{ErrorMap, Outcome};

use crate::flow::FiledError;

/// An error together with its rule's position in the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub order: usize,
    pub error: FiledError,
}

/// Collects settled errors and merges them into an [`ErrorMap`].
#[derive(Debug, Default)]
pub struct Aggregator {
    settled: Vec<Settled>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, settled: impl IntoIterator<Item = Settled>) {
        self.settled.extend(settled);
    }

    /// Merge everything collected so far.
    pub fn errors(&self) -> ErrorMap {
        let mut ordered: Vec<&Settled> = self.settled.iter().collect();
        ordered.sort_by_key(|s| s.order);
        ordered
            .into_iter()
            .map(|s| (s.error.key.clone(), s.error.payload.clone()))
            .collect()
    }

    /// Passed when nothing was filed, rejected with the merged map otherwise.
    pub fn finish(self) -> Outcome {
        Outcome::from_errors(self.errors())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settled(order: usize, key: &str, message: &str) -> Settled {
        Settled {
            order,
            error: FiledError {
                key: key.into(),
                payload: message.into(),
            },
        }
    }

    #[test]
    fn nothing_settled_passes() {
        assert!(Aggregator::new().finish().is_passed());
    }

    #[test]
    fn merges_in_schedule_order() {
        let mut aggregator = Aggregator::new();
        aggregator.extend([
            settled(3, "password", "third"),
            settled(1, "password", "first"),
            settled(2, "email", "second"),
        ]);

        assert_eq!(
            aggregator.errors().to_json(),
            json!({"password": ["first", "third"], "email": "second"})
        );
    }

    #[test]
    fn rules_of_different_fields_share_a_key() {
        let mut aggregator = Aggregator::new();
        aggregator.extend([settled(1, "_error", "from email"), settled(5, "_error", "from password")]);
        let errors = aggregator.finish().into_result().unwrap_err();
        assert_eq!(
            errors.get("_error").unwrap().messages(),
            vec!["from email", "from password"]
        );
    }
}
