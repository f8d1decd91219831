//! Context registry: the forest of root contexts.
//!
//! Registration is rare and concentrated in startup; lookup is frequent. A single
//! read/write lock guards the root map, and nodes are handed out as `Arc`s so
//! callers never hold the lock while they walk a tree.

use crate::context::ContextNode;
use crate::error::WshError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Concurrency-safe store of root contexts
#[derive(Default)]
pub struct ContextRegistry {
    roots: RwLock<HashMap<char, Arc<ContextNode>>>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root context.
    ///
    /// Re-registering a letter with the same script is a no-op. A different
    /// script for a claimed letter is a conflict: the first registrant stays.
    pub fn register(&self, node: impl Into<Arc<ContextNode>>) -> Result<(), WshError> {
        let node = node.into();
        let mut roots = self.roots.write();

        if let Some(existing) = roots.get(&node.letter) {
            if existing.script_path() == node.script_path() {
                debug!(letter = %node.letter, "context already registered by same script");
                return Ok(());
            }
            return Err(WshError::RegistrationConflict {
                letter: node.letter,
                existing: existing.script_label(),
                rejected: node.script_label(),
            });
        }

        let duplicates = node.duplicate_flag_names();
        if !duplicates.is_empty() {
            warn!(
                letter = %node.letter,
                duplicates = ?duplicates,
                "context declares duplicate flags; first declaration wins"
            );
        }

        debug!(letter = %node.letter, long = %node.long, script = %node.script_label(), "registered context");
        roots.insert(node.letter, node);
        Ok(())
    }

    /// Walk `path` through the roots and their sub-contexts.
    ///
    /// Returns `None` for an empty path or as soon as any segment is missing.
    pub fn lookup(&self, path: &[char]) -> Option<Arc<ContextNode>> {
        let (first, rest) = path.split_first()?;
        let mut current = self.root(*first)?;
        for letter in rest {
            let next = current.sub_context(*letter)?.clone();
            current = next;
        }
        Some(current)
    }

    pub fn root(&self, letter: char) -> Option<Arc<ContextNode>> {
        self.roots.read().get(&letter).cloned()
    }

    pub fn root_by_long(&self, long: &str) -> Option<Arc<ContextNode>> {
        self.roots
            .read()
            .values()
            .find(|node| node.long == long)
            .cloned()
    }

    /// Snapshot of the root contexts in unspecified order.
    pub fn all_roots(&self) -> Vec<Arc<ContextNode>> {
        self.roots.read().values().cloned().collect()
    }

    /// Snapshot of the root contexts ordered by letter.
    pub fn sorted_roots(&self) -> Vec<Arc<ContextNode>> {
        let mut roots = self.all_roots();
        roots.sort_by_key(|node| node.letter);
        roots
    }

    pub fn len(&self) -> usize {
        self.roots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.read().is_empty()
    }
}
