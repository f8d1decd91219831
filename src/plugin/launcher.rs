//! Running a plugin script to capture its self-description.
//!
//! The launcher only knows about processes and time budgets. What the
//! captured output means is decided by [`crate::protocol::wire`].

use crate::error::WshError;
use crate::protocol::{ENV_BINARY, ENV_PLUGIN_SCRIPT};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Produces the raw self-description output of one plugin script.
#[async_trait]
pub trait PluginLauncher: Send + Sync {
    async fn launch(&self, script: &Path) -> Result<String, WshError>;
}

/// Launches scripts as child processes of the running binary.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    binary: PathBuf,
    timeout: Duration,
}

impl ProcessLauncher {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }
}

#[async_trait]
impl PluginLauncher for ProcessLauncher {
    async fn launch(&self, script: &Path) -> Result<String, WshError> {
        let mut cmd = Command::new(script);
        cmd.env(ENV_BINARY, &self.binary)
            .env(ENV_PLUGIN_SCRIPT, script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            // Dropping the output future on timeout kills the child.
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| {
            WshError::ExecutionFailure(format!("Failed to launch {}: {}", script.display(), e))
        })?;
        debug!(script = %script.display(), pid = ?child.id(), "launched plugin");

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => return Err(WshError::Timeout(self.timeout)),
        };

        if !output.status.success() {
            return Err(WshError::Protocol(format!(
                "{} exited with {}",
                script.display(),
                output.status
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| WshError::Protocol(format!("output is not valid UTF-8: {}", e)))
    }
}
