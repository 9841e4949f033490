//! The rule scheduler.
//!
//! A run normalizes the spec, drives each field's rule chain, and hands the
//! settled errors to the aggregator. All stop state lives in a [`RunContext`]
//! created for that run alone, so concurrent runs on one [`Validator`] never
//! see each other's `last` / `lastAll` decisions.
//!
//! # Scheduling
//!
//! Within a field, each rule is awaited before the next one starts, so a
//! failing `last` rule reliably stops the rest of its field. Across fields the
//! [`Schedule`] decides: `Sequential` walks fields in spec order, `Interleaved`
//! advances all field chains together on the calling task. A rule that was
//! already running when another field stopped the run still completes, but
//! its result is dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::try_join_all;
use serde_json::Value;
use tracing::Instrument;
use vetter_types::Outcome;

use crate::aggregate::{Aggregator, Settled};
use crate::config::{EngineConfig, Schedule};
use crate::error::EngineError;
use crate::flow::RuleFlow;
use crate::payload::settle;
use crate::predicate::{Predicate, PredicateRegistry};
use crate::rule::{FieldRules, RuleSpec, normalize_spec};
use crate::trace::{SkipReason, TraceLogger, Tracer};

/// Transient state of one run.
#[derive(Debug, Default)]
struct RunContext {
    stopped: AtomicBool,
}

impl RunContext {
    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }
}

/// A runnable rule and its position in the overall schedule.
struct PlannedRule {
    order: usize,
    predicate: Arc<dyn Predicate>,
    spec: RuleSpec,
}

/// The runnable rules of one field.
struct FieldChain {
    field: String,
    rules: Vec<PlannedRule>,
}

/// Runs validation specs against data records.
///
/// A `Validator` holds no per-run state and can be shared across tasks.
#[derive(Clone)]
pub struct Validator {
    registry: Arc<PredicateRegistry>,
    config: EngineConfig,
    logger: Option<Arc<dyn TraceLogger>>,
}

impl Validator {
    /// Create a validator resolving predicate names through `registry`.
    pub fn new(registry: impl Into<Arc<PredicateRegistry>>) -> Self {
        Self {
            registry: registry.into(),
            config: EngineConfig::default(),
            logger: None,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Send formatted trace lines to `logger`.
    pub fn with_logger(mut self, logger: Arc<dyn TraceLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &PredicateRegistry {
        &self.registry
    }

    /// Validate `record` against `spec`.
    ///
    /// Failing rules are reported through [`Outcome::Rejected`]; `Err` means a
    /// predicate itself failed and the run was abandoned.
    pub async fn run(&self, spec: &Value, record: &Value) -> Result<Outcome, EngineError> {
        let tracer = Tracer::new(self.logger.clone(), self.config.redact_values);
        let Some(fields) = normalize_spec(spec, &self.registry) else {
            tracing::info!("no validations configured");
            return Ok(Outcome::no_validations());
        };

        let chains = plan(fields, &tracer);
        let rule_count: usize = chains.iter().map(|c| c.rules.len()).sum();
        let span = tracing::debug_span!(
            "validation_run",
            fields = chains.len(),
            rules = rule_count,
            schedule = %self.config.schedule
        );

        let run = RunContext::default();
        let settled = self
            .drive(&chains, record, &run, &tracer)
            .instrument(span)
            .await?;

        let mut aggregator = Aggregator::new();
        aggregator.extend(settled);
        let outcome = aggregator.finish();
        tracing::debug!(
            passed = outcome.is_passed(),
            stopped = run.is_stopped(),
            "validation run finished"
        );
        Ok(outcome)
    }

    async fn drive(
        &self,
        chains: &[FieldChain],
        record: &Value,
        run: &RunContext,
        tracer: &Tracer,
    ) -> Result<Vec<Settled>, EngineError> {
        match self.config.schedule {
            Schedule::Sequential => {
                let mut settled = Vec::new();
                for chain in chains {
                    settled.extend(run_chain(chain, record, run, tracer).await?);
                }
                Ok(settled)
            }
            Schedule::Interleaved => {
                let per_field = try_join_all(
                    chains
                        .iter()
                        .map(|chain| run_chain(chain, record, run, tracer)),
                )
                .await?;
                Ok(per_field.into_iter().flatten().collect())
            }
        }
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

/// Validate `record` against `spec` with a one-off [`Validator`].
pub async fn run_validations(
    spec: &Value,
    record: &Value,
    registry: impl Into<Arc<PredicateRegistry>>,
    logger: Option<Arc<dyn TraceLogger>>,
) -> Result<Outcome, EngineError> {
    let mut validator = Validator::new(registry);
    if let Some(logger) = logger {
        validator = validator.with_logger(logger);
    }
    validator.run(spec, record).await
}

/// Number every rule in spec order and drop the inert ones.
fn plan(fields: Vec<FieldRules>, tracer: &Tracer) -> Vec<FieldChain> {
    let mut order = 0;
    fields
        .into_iter()
        .map(|FieldRules { field, rules }| {
            let rules = rules
                .into_iter()
                .filter_map(|spec| {
                    let Some(predicate) = spec.predicate.clone() else {
                        tracer.invalid(&spec);
                        return None;
                    };
                    order += 1;
                    Some(PlannedRule {
                        order,
                        predicate,
                        spec,
                    })
                })
                .collect();
            FieldChain { field, rules }
        })
        .collect()
}

/// Run one field's rules in order.
async fn run_chain(
    chain: &FieldChain,
    record: &Value,
    run: &RunContext,
    tracer: &Tracer,
) -> Result<Vec<Settled>, EngineError> {
    let mut settled = Vec::new();
    let mut field_stopped = false;

    for rule in &chain.rules {
        if run.is_stopped() {
            tracer.skipped(&rule.spec, SkipReason::Run);
            continue;
        }
        if field_stopped {
            tracer.skipped(&rule.spec, SkipReason::Field);
            continue;
        }

        let flow = run_rule(rule, record, tracer).await?;

        // Another field may have stopped the run while this rule was pending.
        if run.is_stopped() {
            tracer.skipped(&rule.spec, SkipReason::Discarded);
            continue;
        }

        match &flow {
            RuleFlow::Normal(_) => {}
            RuleFlow::FieldStop(_) => {
                tracing::debug!(field = %chain.field, "field stopped");
                field_stopped = true;
            }
            RuleFlow::RunStop(_) => {
                tracing::debug!(field = %chain.field, "run stopped");
                run.stop();
            }
        }
        if let Some(error) = flow.into_error() {
            settled.push(Settled {
                order: rule.order,
                error,
            });
        }
    }

    Ok(settled)
}

/// Invoke a rule's predicate and settle the result.
async fn run_rule(rule: &PlannedRule, record: &Value, tracer: &Tracer) -> Result<RuleFlow, EngineError> {
    let spec = &rule.spec;
    let value = spec.input_value(record);
    let siblings = spec.include_sibling_data.then_some(record);

    tracer.start(spec, &value, siblings);
    let result = rule
        .predicate
        .check(&value, siblings)
        .await
        .map_err(|source| EngineError::Predicate {
            field: spec.field.clone(),
            predicate: rule.predicate.name().to_string(),
            source,
        })?;

    let flow = settle(spec, &result, record);
    tracer.result(spec, &result, flow.is_passed());
    Ok(flow)
}
