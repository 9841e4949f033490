//! Argument definitions for the `vetter` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vetter_engine::Schedule;

#[derive(Debug, Parser)]
#[command(
    name = "vetter",
    version,
    about = "Run declarative field validations against a JSON record"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a record against a rule spec.
    Check(CheckArgs),

    /// List the built-in predicate names.
    Predicates,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// JSON file mapping field names to rules.
    #[arg(long, value_name = "FILE")]
    pub rules: PathBuf,

    /// JSON file holding the record to validate.
    #[arg(long, value_name = "FILE")]
    pub data: PathBuf,

    /// TOML file with an `[engine]` table.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How field rule chains are driven (overrides the config file).
    #[arg(long, value_enum)]
    pub schedule: Option<ScheduleArg>,

    /// Leave field values out of trace lines (overrides the config file).
    #[arg(long)]
    pub redact_values: bool,

    /// Print a trace line per rule to stderr.
    #[arg(long)]
    pub trace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScheduleArg {
    Sequential,
    Interleaved,
}

impl From<ScheduleArg> for Schedule {
    fn from(arg: ScheduleArg) -> Self {
        match arg {
            ScheduleArg::Sequential => Schedule::Sequential,
            ScheduleArg::Interleaved => Schedule::Interleaved,
        }
    }
}
