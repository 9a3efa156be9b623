// src/runner.rs

//! Scratch-file write and interpreter invocation.
//!
//! One run is strictly sequential: substitute inputs, write the program to a
//! uniquely named file in the system temp directory, spawn
//! `<interpreter> run <file>`, and wait for it to finish while capturing both
//! output streams. No timeout is applied and the exit status is not
//! inspected; whatever the interpreter writes to stderr is surfaced verbatim,
//! even on runs that succeed.

use crate::config::Config;
use crate::substitute::{substitute_inputs, SubstituteError, TypedInput};

use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use uuid::Uuid;

/// Captured interpreter output for a single run.
#[derive(Debug)]
pub struct ExecutionResult {
    /// Everything the interpreter wrote to stdout.
    pub output: String,

    /// Everything the interpreter wrote to stderr. Non-empty does not imply
    /// failure; the interpreter's diagnostic channel is always surfaced.
    pub error: String,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Substitute(#[from] SubstituteError),

    #[error("failed to write program file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to launch {command:?}: {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },
}

/// Allocate a fresh scratch path in the system temp directory.
///
/// The 128-bit random token makes collisions across concurrent requests a
/// non-concern. Scratch files are never deleted; the OS temp directory owns
/// their lifetime.
pub fn scratch_path(extension: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "jacpad_{}.{}",
        Uuid::new_v4().simple(),
        extension
    ))
}

/// Full pipeline for one request: substitute, write, execute.
pub async fn run_source(
    cfg: &Config,
    code: &str,
    inputs: &[TypedInput],
) -> Result<ExecutionResult, RunnerError> {
    let program = substitute_inputs(code, inputs)?;

    let path = scratch_path(&cfg.interpreter.extension);
    tokio::fs::write(&path, &program)
        .await
        .map_err(|source| RunnerError::Write {
            path: path.clone(),
            source,
        })?;

    tracing::debug!(path = %path.display(), "wrote program file");

    run_file(cfg, &path).await
}

/// Execute the interpreter against an already-written program file.
pub async fn run_file(cfg: &Config, path: &Path) -> Result<ExecutionResult, RunnerError> {
    let mut cmd = Command::new(&cfg.interpreter.command);
    cmd.arg("run")
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    for (k, v) in &cfg.env {
        cmd.env(k, v);
    }

    capture(cmd, &cfg.interpreter.command).await
}

/// List the packages installed in the interpreter's environment.
///
/// Backs the `/debug` endpoint. The output format is whatever `pip list`
/// prints; it is returned uninterpreted.
pub async fn list_packages(cfg: &Config) -> Result<String, RunnerError> {
    let mut cmd = Command::new(&cfg.diagnostics.pip);
    cmd.arg("list")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let result = capture(cmd, &cfg.diagnostics.pip).await?;
    Ok(result.output)
}

/// Spawn a prepared command and wait for it, capturing both streams.
async fn capture(mut cmd: Command, command_name: &str) -> Result<ExecutionResult, RunnerError> {
    let child = cmd.spawn().map_err(|source| RunnerError::Launch {
        command: command_name.to_string(),
        source,
    })?;

    let out = child
        .wait_with_output()
        .await
        .map_err(|source| RunnerError::Launch {
            command: command_name.to_string(),
            source,
        })?;

    Ok(ExecutionResult {
        output: String::from_utf8_lossy(&out.stdout).into_owned(),
        error: String::from_utf8_lossy(&out.stderr).into_owned(),
    })
}
