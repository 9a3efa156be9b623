// src/cli.rs

use crate::substitute::TypedInput;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Playground backend for the Jac language.
///
/// `jacpad.yaml` is the primary source of truth; CLI flags only override
/// config values.
#[derive(Parser, Debug)]
#[command(
    name = "jacpad",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// All supported CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server.
    ///
    /// Exposes POST /run, GET /debug and GET /health.
    Serve {
        /// Path to config file
        ///
        /// Defaults to ./jacpad.yaml; missing file means defaults.
        #[arg(short, long, default_value = "jacpad.yaml")]
        config: PathBuf,

        /// Override the listen address
        ///
        /// Example:
        /// --bind 0.0.0.0:8000
        #[arg(long)]
        bind: Option<String>,
    },

    /// Run a Jac source file locally through the same pipeline the server
    /// uses, printing interpreter stdout/stderr.
    Run {
        /// Jac source file to execute
        file: PathBuf,

        /// Typed input as VALUE:TYPE (can be passed multiple times)
        ///
        /// Example:
        /// --input 5:int --input hello:str
        #[arg(long = "input", value_parser = parse_typed_input)]
        input: Vec<TypedInput>,

        /// Path to config file
        #[arg(short, long, default_value = "jacpad.yaml")]
        config: PathBuf,
    },
}

/// Parse a `VALUE:TYPE` CLI argument into a [`TypedInput`].
///
/// The split is on the last colon so values may themselves contain colons.
fn parse_typed_input(raw: &str) -> Result<TypedInput, String> {
    let (value, kind) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected VALUE:TYPE, got {:?}", raw))?;

    Ok(TypedInput {
        value: value.to_string(),
        kind: kind.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_value_and_type() {
        let input = parse_typed_input("5:int").unwrap();
        assert_eq!(input.value, "5");
        assert_eq!(input.kind, "int");
    }

    #[test]
    fn splits_on_the_last_colon() {
        let input = parse_typed_input("a:b:str").unwrap();
        assert_eq!(input.value, "a:b");
        assert_eq!(input.kind, "str");
    }

    #[test]
    fn rejects_missing_type() {
        assert!(parse_typed_input("5").is_err());
    }
}
