//! vetter entry point.
//!
//! Logs go to stderr and respect `RUST_LOG`; results go to stdout.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use vetter_cli::cli::Cli;
use vetter_cli::commands::EXIT_FAILURE;

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("vetter=info".parse()?))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = init_tracing() {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::from(EXIT_FAILURE);
    }

    match vetter_cli::run(cli).await {
        Ok(status) => ExitCode::from(status),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
