// src/main.rs

//! jacpad
//!
//! Entry point for the jacpad binary.
//!
//! jacpad is a playground backend for the Jac language: it substitutes typed
//! input values into `input()` calls in submitted source, writes the result
//! to a scratch file and executes the `jac` interpreter against it, returning
//! the captured output over HTTP.
//!
//! Responsibilities of this file:
//! - Parse CLI arguments
//! - Initialise logging and the async runtime
//! - Hand off to the server or the one-shot runner
//!
//! There is intentionally *no business logic* here.

mod cli;
mod config;
mod runner;
mod server;
mod substitute;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::EnvFilter;

/// Program entry point.
///
/// Uses Tokio because every run spawns and waits on a child interpreter
/// process asynchronously.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Serve { config, bind } => {
            let cfg = Config::load_or_default(&config)?;
            let addr = bind.unwrap_or_else(|| cfg.server.bind.clone());
            server::serve(cfg, &addr).await
        }

        cli::Command::Run {
            file,
            input,
            config,
        } => {
            let cfg = Config::load_or_default(&config)?;
            let code = std::fs::read_to_string(&file)?;

            let result = runner::run_source(&cfg, &code, &input).await?;

            print!("{}", result.output);
            eprint!("{}", result.error);
            Ok(())
        }
    }
}
