//! vetter-cli: run validation specs from the command line.
//!
//! ```bash
//! vetter check --rules login.rules.json --data attempt.json --trace
//! vetter predicates
//! ```

pub mod cli;
pub mod commands;

use anyhow::Result;

use crate::cli::{Cli, Command};
use crate::commands::{EXIT_PASSED, render_outcome, run_check, run_predicates};

/// Execute a parsed command line, printing results to stdout.
///
/// Returns the process exit status.
pub async fn run(cli: Cli) -> Result<u8> {
    match cli.command {
        Command::Check(args) => {
            let outcome = run_check(&args).await?;
            let (status, body) = render_outcome(&outcome)?;
            if let Some(body) = body {
                println!("{body}");
            }
            Ok(status)
        }
        Command::Predicates => {
            for name in run_predicates() {
                println!("{name}");
            }
            Ok(EXIT_PASSED)
        }
    }
}
