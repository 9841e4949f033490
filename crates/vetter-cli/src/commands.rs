//! Subcommand implementations.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use vetter_engine::{EngineConfig, Outcome, PredicateRegistry, TraceLogger, Validator};

use crate::cli::CheckArgs;

/// Exit status for a run that passed.
pub const EXIT_PASSED: u8 = 0;
/// Exit status for a run that produced errors.
pub const EXIT_REJECTED: u8 = 1;
/// Exit status for anything that kept the run from finishing.
pub const EXIT_FAILURE: u8 = 2;

/// Load the spec and record, then run them through a validator with the built-ins.
pub async fn run_check(args: &CheckArgs) -> Result<Outcome> {
    let config = resolve_config(args)?;
    let spec = read_json(&args.rules).context("failed to load rules")?;
    let record = read_json(&args.data).context("failed to load data")?;

    tracing::info!(
        rules = %args.rules.display(),
        data = %args.data.display(),
        schedule = %config.schedule,
        "running validations"
    );

    let mut validator = Validator::new(PredicateRegistry::with_builtins()).with_config(config);
    if args.trace {
        let logger: Arc<dyn TraceLogger> = Arc::new(|line: &str| eprintln!("{line}"));
        validator = validator.with_logger(logger);
    }

    let outcome = validator.run(&spec, &record).await?;
    tracing::info!(passed = outcome.is_passed(), "validations finished");
    Ok(outcome)
}

/// Names of the built-in predicates, sorted.
pub fn run_predicates() -> Vec<String> {
    PredicateRegistry::with_builtins()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Config file values with command-line overrides applied.
pub fn resolve_config(args: &CheckArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(schedule) = args.schedule {
        config.schedule = schedule.into();
    }
    if args.redact_values {
        config.redact_values = true;
    }
    Ok(config)
}

/// Exit status and stdout body for a finished run.
pub fn render_outcome(outcome: &Outcome) -> Result<(u8, Option<String>)> {
    match outcome {
        Outcome::Passed => Ok((EXIT_PASSED, None)),
        Outcome::Rejected(errors) => {
            let body = serde_json::to_string_pretty(errors)?;
            Ok((EXIT_REJECTED, Some(body)))
        }
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
