//! Built-in defaults, the lowest configuration layer.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Plugin self-description budget in seconds.
pub const DEFAULT_PLUGIN_TIMEOUT_SECS: u64 = 10;

/// Create a Config builder with defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("plugins.timeout_secs", DEFAULT_PLUGIN_TIMEOUT_SECS)?
        .set_default("logging.level", "off")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
