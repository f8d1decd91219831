//! Configuration
//!
//! Layers, lowest to highest precedence: built-in defaults, the global
//! `<config home>/wsh/config.toml`, then `WSH_<SECTION>__<KEY>` environment
//! variables (`WSH_PLUGINS__TIMEOUT_SECS=3`).

use crate::error::WshError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub(crate) mod merge;
pub(crate) mod sources;

pub use merge::DEFAULT_PLUGIN_TIMEOUT_SECS;
pub use sources::{config_home, global_config_path};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WshConfig {
    #[serde(default)]
    pub plugins: PluginConfig,

    #[serde(default)]
    pub shell: ShellConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Plugin discovery and bootstrap settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Plugin directory (overridden by `WSH_PLUGIN_DIR`)
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Budget for one plugin to describe itself
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Plugins described at the same time; unset means all at once
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_PLUGIN_TIMEOUT_SECS
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            dir: None,
            timeout_secs: default_timeout_secs(),
            max_concurrency: None,
        }
    }
}

impl PluginConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        if self.max_concurrency == Some(0) {
            return Err("max_concurrency must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Interactive shell settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Shell program; falls back to `$SHELL`, then `/bin/sh`
    #[serde(default)]
    pub program: Option<String>,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Plugins(String),
    Shell(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Plugins(msg) => write!(f, "plugins: {}", msg),
            ValidationError::Shell(msg) => write!(f, "shell: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl WshConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.plugins.validate() {
            errors.push(ValidationError::Plugins(e));
        }
        if let Some(program) = &self.shell.program {
            if program.trim().is_empty() {
                errors.push(ValidationError::Shell("program cannot be empty".to_string()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Builds a validated [`WshConfig`] from the configuration layers.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global file, and environment overrides.
    pub fn load() -> Result<WshConfig, WshError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::add_global_file(builder)?;
        let builder = sources::add_environment(builder)?;
        let config: WshConfig = builder.build()?.try_deserialize()?;
        check(config)
    }

    /// Load defaults plus one explicit file, ignoring the environment.
    pub fn load_from_file(path: &Path) -> Result<WshConfig, WshError> {
        let config: WshConfig = merge::builder_with_defaults()?
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;
        check(config)
    }

    /// Built-in defaults only.
    pub fn default() -> WshConfig {
        WshConfig::default()
    }
}

fn check(config: WshConfig) -> Result<WshConfig, WshError> {
    config.validate().map_err(|errors| {
        let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        WshError::Config(format!(
            "Configuration validation failed:\n{}",
            msgs.join("\n")
        ))
    })?;
    Ok(config)
}
