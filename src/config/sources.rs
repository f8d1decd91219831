//! Configuration sources: the global file and `WSH_` environment variables.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use directories::BaseDirs;
use std::path::PathBuf;
use tracing::debug;

/// Per-user configuration root (`$XDG_CONFIG_HOME`, else `~/.config` on Linux).
pub fn config_home() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

/// `<config home>/wsh/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    config_home().map(|home| home.join("wsh").join("config.toml"))
}

/// Add the global config file to the builder if it exists.
pub fn add_global_file(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match global_config_path() {
        Some(path) if path.is_file() => {
            debug!(config_path = %path.display(), "loading global configuration");
            Ok(builder.add_source(File::from(path).required(false)))
        }
        _ => Ok(builder),
    }
}

/// Add `WSH_<SECTION>__<KEY>` environment overrides.
pub fn add_environment(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("WSH")
            .prefix_separator("_")
            .separator("__"),
    ))
}
