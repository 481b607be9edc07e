//! Configuration handling for metadoc plugins
//!
//! Configuration is read from `~/.config/metadoc/config.toml` (global) and
//! `./metadoc.toml` (project). Keys set in the project file override the
//! global ones; anything unset falls back to the defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Plugin configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Environment variable holding the script runner's command line
    pub lifecycle_env: String,

    /// How long to wait for the first byte on stdin
    pub stdin_timeout_ms: u64,

    /// File name appended when the output target is a directory
    pub default_filename: String,

    /// Where unparseable input is dumped, relative to the working directory
    pub diagnostic_log: String,

    /// Print verbose diagnostics to stderr
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lifecycle_env: "npm_lifecycle_script".to_string(),
            stdin_timeout_ms: 1000,
            default_filename: "api.json".to_string(),
            diagnostic_log: "metadoc-source.log".to_string(),
            verbose: false,
        }
    }
}

impl Config {
    /// Name of the project-level config file
    pub const PROJECT_FILE: &'static str = "metadoc.toml";

    /// Loads configuration for the current working directory
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine working directory")?;
        Self::load_from(Self::global_config_path().as_deref(), &cwd)
    }

    /// Loads configuration from an explicit global file and project root
    pub fn load_from(global: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut merged = toml::Table::new();

        if let Some(global) = global {
            merged.extend(Self::read_table(global)?);
        }
        let project = project_root.join(Self::PROJECT_FILE);
        merged.extend(Self::read_table(&project)?);

        let config: Config = toml::Value::Table(merged)
            .try_into()
            .context("Failed to merge configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Returns the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "metadoc", "metadoc")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Reads one config file, type-checking its keys against `Config`
    fn read_table(path: &Path) -> Result<toml::Table> {
        if !path.exists() {
            return Ok(toml::Table::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let parse_error = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let table = content
            .parse::<toml::Table>()
            .map_err(|e| parse_error(e.to_string()))?;
        toml::Value::Table(table.clone())
            .try_into::<Config>()
            .map_err(|e| parse_error(e.to_string()))?;

        Ok(table)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.lifecycle_env.trim().is_empty() {
            return Err(ConfigError::Invalid("lifecycle_env must not be empty".to_string()));
        }
        if self.default_filename.trim().is_empty() {
            return Err(ConfigError::Invalid("default_filename must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn stdin_timeout(&self) -> Duration {
        Duration::from_millis(self.stdin_timeout_ms)
    }

    /// Diagnostic log location for a given working directory
    pub fn diagnostic_log_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.diagnostic_log)
    }
}
