//! vetter-engine: the declarative field-validation engine.
//!
//! This crate provides:
//!
//! - **Rule normalizer**: raw rule objects (long or short option names) into [`RuleSpec`]s
//! - **Scheduler**: runs each field's rules in order, honoring `last` and `lastAll`
//! - **Aggregator**: merges failures into an [`ErrorMap`] keyed by output key
//! - **Predicates**: the [`Predicate`] trait, a [`PredicateRegistry`] and built-ins
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use vetter_engine::{PredicateRegistry, Validator};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), vetter_engine::EngineError> {
//! let validator = Validator::new(PredicateRegistry::with_builtins());
//! let spec = json!({
//!     "email": [{"v": "is_empty", "m": "Email cannot be empty", "last": true}]
//! });
//!
//! let outcome = validator.run(&spec, &json!({"email": ""})).await?;
//! let errors = outcome.into_result().unwrap_err();
//! assert_eq!(errors.to_json(), json!({"email": "Email cannot be empty"}));
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod flow;
pub mod payload;
pub mod predicate;
pub mod rule;
pub mod runner;
pub mod template;
pub mod trace;
mod value;

pub use config::{ConfigError, EngineConfig, Schedule};
pub use error::{EngineError, PredicateError};
pub use flow::{FiledError, RuleFlow};
pub use predicate::{AsyncFnPredicate, FnPredicate, Predicate, PredicateRegistry};
pub use rule::{RuleSpec, normalize_rule, normalize_spec};
pub use runner::{Validator, run_validations};
pub use trace::TraceLogger;

pub use vetter_types::{
    ErrorEntry, ErrorMap, ErrorPayload, GENERIC_ERROR_KEY, Outcome, Redirection,
};
