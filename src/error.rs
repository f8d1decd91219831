//! Error types for the wsh context registry, plugin protocol, and argument resolution.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Grammar violations in a self-description token stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("need at least: --name \"description\" or -X --name \"description\"")]
    Empty,

    #[error("expected context flag (e.g., -T or --time), got: {0}")]
    ExpectedContextHeader(String),

    #[error("context short flag must be a capital letter, got: {0}")]
    InvalidContextLetter(String),

    #[error("must specify at least one of short (-X) or long (--name) context flag")]
    MissingContextName,

    #[error("missing description after {0}")]
    MissingDescription(String),

    #[error("flag must have at least short or long name, got: {0}")]
    FlagWithoutName(String),

    #[error("flag {0} missing description")]
    FlagWithoutDescription(String),

    #[error("sub-context -{letter} mapped under key {key}")]
    MismatchedSubContext { key: char, letter: char },
}

/// Errors surfaced by registration, bootstrap, resolution, and dispatch
#[derive(Debug, Error)]
pub enum WshError {
    #[error("unknown context: -{0}")]
    UnknownContext(char),

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("flag {0} requires an argument")]
    MissingFlagArgument(String),

    #[error("context -{letter} already registered by {existing}, ignoring {rejected}")]
    RegistrationConflict {
        letter: char,
        existing: String,
        rejected: String,
    },

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("plugin execution timed out after {0:?}")]
    Timeout(Duration),

    #[error("execution failure: {0}")]
    ExecutionFailure(String),

    #[error("invalid context definition: {0}")]
    Definition(#[from] DefinitionError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for WshError {
    fn from(err: config::ConfigError) -> Self {
        WshError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for WshError {
    fn from(err: serde_json::Error) -> Self {
        WshError::Protocol(err.to_string())
    }
}

/// A failure scoped to one plugin script during bootstrap
#[derive(Debug, Error)]
#[error("plugin {}: {error}", display_name(.script))]
pub struct PluginFailure {
    pub script: PathBuf,
    #[source]
    pub error: WshError,
}

impl PluginFailure {
    pub fn new(script: PathBuf, error: WshError) -> Self {
        Self { script, error }
    }
}

fn display_name(script: &std::path::Path) -> String {
    script
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| script.display().to_string())
}
