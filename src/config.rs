// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, env, fs, path::Path};

/// Root configuration loaded from `jacpad.yaml`.
///
/// Everything is optional: with no config file at all the server binds
/// 127.0.0.1:8000 and runs `jac` from the PATH. The file controls:
/// - Which address the server listens on
/// - Which interpreter binary is invoked and the scratch-file extension
/// - Which environment variables are injected into the interpreter process
///
/// `JACPAD_BIND` and `JACPAD_INTERPRETER` override the file after loading.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server section
    #[serde(default)]
    pub server: Server,

    /// Interpreter invocation section
    #[serde(default)]
    pub interpreter: Interpreter,

    /// Diagnostics section (backs `/debug`)
    #[serde(default)]
    pub diagnostics: Diagnostics,

    /// Environment variables injected into the interpreter process
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// HTTP server configuration.
///
/// Example:
///
/// server:
///   bind: 0.0.0.0:8000
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

/// Interpreter configuration.
///
/// Example:
///
/// interpreter:
///   command: jac
///   extension: jac
#[derive(Debug, Clone, Deserialize)]
pub struct Interpreter {
    /// Binary invoked as `<command> run <file>`, resolved via PATH.
    #[serde(default = "default_interpreter")]
    pub command: String,

    /// Extension given to scratch program files.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self {
            command: default_interpreter(),
            extension: default_extension(),
        }
    }
}

fn default_interpreter() -> String {
    "jac".to_string()
}

fn default_extension() -> String {
    "jac".to_string()
}

/// Diagnostics configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Diagnostics {
    /// Binary invoked as `<pip> list` by the `/debug` endpoint.
    #[serde(default = "default_pip")]
    pub pip: String,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self { pip: default_pip() }
    }
}

fn default_pip() -> String {
    "pip".to_string()
}

impl Config {
    /// Load and parse a YAML config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let cfg: Config =
            serde_yaml::from_str(&raw).context("Failed to parse YAML config")?;

        Ok(cfg)
    }

    /// Load the config file if it exists, fall back to defaults otherwise,
    /// then apply environment overrides.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let mut cfg = if path.exists() {
            Self::load(path)?
        } else {
            Self::default()
        };

        if let Ok(bind) = env::var("JACPAD_BIND") {
            cfg.server.bind = bind;
        }
        if let Ok(command) = env::var("JACPAD_INTERPRETER") {
            cfg.interpreter.command = command;
        }

        Ok(cfg)
    }
}
