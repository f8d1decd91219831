//! Bootstrap: describe every plugin concurrently, then register serially.
//!
//! Each worker launches one script and decodes its document. Nothing touches
//! the registry until every worker has finished; the collector then registers
//! the decoded trees one by one in script order, so conflicts always resolve
//! in favour of the script that sorts first.

use crate::context::ContextNode;
use crate::error::{PluginFailure, WshError};
use crate::plugin::launcher::PluginLauncher;
use crate::protocol::wire;
use crate::registry::ContextRegistry;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Outcome of one bootstrap pass. Never fatal on its own.
#[derive(Debug, Default)]
pub struct BootstrapReport {
    /// Letters of the root contexts registered by this pass
    pub registered: Vec<char>,
    /// Registration conflicts, downgraded to warnings
    pub conflicts: Vec<WshError>,
    /// Per-script launch, timeout, and protocol failures
    pub failures: Vec<PluginFailure>,
}

impl BootstrapReport {
    /// The first plugin failure, in script order.
    pub fn first_failure(&self) -> Option<&PluginFailure> {
        self.failures.first()
    }

    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty() && self.failures.is_empty()
    }
}

/// Fan-out over plugin scripts with an optional concurrency limit
pub struct Bootstrap<L> {
    launcher: L,
    limit: Option<Arc<Semaphore>>,
}

impl<L: PluginLauncher> Bootstrap<L> {
    /// One worker per script, all running at once.
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            limit: None,
        }
    }

    /// Cap the number of plugins running at the same time. `None` lifts the cap.
    pub fn with_max_concurrency(mut self, max: Option<usize>) -> Self {
        self.limit = max.map(|permits| Arc::new(Semaphore::new(permits.max(1))));
        self
    }

    /// Describe every script, then register what decoded.
    pub async fn run(&self, registry: &ContextRegistry, scripts: &[PathBuf]) -> BootstrapReport {
        let workers = scripts.iter().map(|script| async move {
            let outcome = self.describe(script).await;
            (script.clone(), outcome)
        });
        let outcomes = join_all(workers).await;
        collect(registry, outcomes)
    }

    async fn describe(&self, script: &Path) -> Result<ContextNode, WshError> {
        let _permit = match &self.limit {
            Some(limit) => Some(limit.acquire().await.map_err(|e| {
                WshError::ExecutionFailure(format!("plugin worker pool closed: {}", e))
            })?),
            None => None,
        };

        let output = self.launcher.launch(script).await?;
        let mut node = wire::decode(&output)?;
        node.fill_script(script);
        Ok(node)
    }
}

fn collect(
    registry: &ContextRegistry,
    outcomes: Vec<(PathBuf, Result<ContextNode, WshError>)>,
) -> BootstrapReport {
    let mut report = BootstrapReport::default();

    for (script, outcome) in outcomes {
        let node = match outcome {
            Ok(node) => node,
            Err(error) => {
                warn!(script = %script.display(), error = %error, "plugin failed to describe itself");
                report.failures.push(PluginFailure::new(script, error));
                continue;
            }
        };

        let letter = node.letter;
        match registry.register(node) {
            Ok(()) => {
                info!(letter = %letter, script = %script.display(), "registered plugin");
                report.registered.push(letter);
            }
            Err(conflict @ WshError::RegistrationConflict { .. }) => {
                warn!(script = %script.display(), error = %conflict, "plugin context conflict");
                report.conflicts.push(conflict);
            }
            Err(error) => {
                report.failures.push(PluginFailure::new(script, error));
            }
        }
    }

    report
}
