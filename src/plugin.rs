//! Plugin discovery, bootstrap, and dispatch.
//!
//! Bootstrap runs every executable in the plugin directory with
//! [`ENV_BINARY`](crate::protocol::ENV_BINARY) set so each one can describe
//! itself through `wsh args --register`. Launching lives in [`launcher`],
//! decoding in [`crate::protocol`], and registration in [`bootstrap`]'s
//! single collector.

pub mod bootstrap;
pub mod discovery;
pub mod dispatch;
pub mod launcher;

pub use bootstrap::{Bootstrap, BootstrapReport};
pub use discovery::{find_plugin_scripts, resolve_plugin_dir};
pub use dispatch::dispatch;
pub use launcher::{PluginLauncher, ProcessLauncher};

use crate::config::PluginConfig;
use crate::error::WshError;
use crate::registry::ContextRegistry;
use std::path::Path;
use tracing::info;

/// Discover and bootstrap every plugin under the configured directory.
///
/// Per-plugin failures land in the returned report. Only a plugin directory
/// that cannot be read, or a runtime that cannot be started, is an `Err`.
pub fn load_plugins(
    registry: &ContextRegistry,
    binary: &Path,
    config: &PluginConfig,
) -> Result<BootstrapReport, WshError> {
    let dir = resolve_plugin_dir(config.dir.as_deref());
    let scripts = find_plugin_scripts(&dir)?;
    if scripts.is_empty() {
        return Ok(BootstrapReport::default());
    }

    let launcher = ProcessLauncher::new(binary, config.timeout());
    let bootstrap = Bootstrap::new(launcher).with_max_concurrency(config.max_concurrency);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| WshError::ExecutionFailure(format!("Failed to create runtime: {}", e)))?;
    let report = rt.block_on(bootstrap.run(registry, &scripts));

    info!(
        dir = %dir.display(),
        registered = report.registered.len(),
        conflicts = report.conflicts.len(),
        failures = report.failures.len(),
        "plugin bootstrap finished"
    );
    Ok(report)
}
