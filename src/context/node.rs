//! Context nodes: one addressable command scope and its nested sub-contexts.

use crate::context::flag::Flag;
use crate::error::DefinitionError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One node of the context tree.
///
/// Nodes are built once (by a built-in registration or by decoding a
/// plugin's self-description) and shared immutably afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextNode {
    pub letter: char,
    #[serde(default)]
    pub long: String,
    #[serde(default)]
    pub description: String,
    /// External script; `None` for built-in contexts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<PathBuf>,
    #[serde(default)]
    pub flags: Vec<Flag>,
    #[serde(default)]
    pub sub_contexts: BTreeMap<char, Arc<ContextNode>>,
}

impl ContextNode {
    pub fn new(letter: char, long: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            letter,
            long: long.into(),
            description: description.into(),
            script: None,
            flags: Vec::new(),
            sub_contexts: BTreeMap::new(),
        }
    }

    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn with_sub_context(mut self, child: ContextNode) -> Self {
        self.sub_contexts.insert(child.letter, Arc::new(child));
        self
    }

    pub fn is_builtin(&self) -> bool {
        self.script_path().is_none()
    }

    /// Script path, treating an empty path as absent.
    pub fn script_path(&self) -> Option<&Path> {
        self.script
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Script path as shown in conflict and help messages.
    pub fn script_label(&self) -> String {
        match self.script_path() {
            Some(path) => path.display().to_string(),
            None => "<built-in>".to_string(),
        }
    }

    /// First flag whose short name matches.
    pub fn flag_by_short(&self, short: char) -> Option<&Flag> {
        self.flags.iter().find(|flag| flag.short == Some(short))
    }

    /// First flag whose long name matches.
    pub fn flag_by_long(&self, long: &str) -> Option<&Flag> {
        self.flags
            .iter()
            .find(|flag| flag.long.as_deref() == Some(long))
    }

    pub fn sub_context(&self, letter: char) -> Option<&Arc<ContextNode>> {
        self.sub_contexts.get(&letter)
    }

    pub fn sub_context_by_long(&self, long: &str) -> Option<&Arc<ContextNode>> {
        self.sub_contexts.values().find(|child| child.long == long)
    }

    /// Flag names declared more than once in this node (first declaration wins at parse time).
    pub fn duplicate_flag_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for flag in &self.flags {
            let mut names = Vec::with_capacity(2);
            if let Some(short) = flag.short {
                names.push(format!("-{}", short));
            }
            if let Some(long) = &flag.long {
                names.push(format!("--{}", long));
            }
            for name in names {
                if !seen.insert(name.clone()) && !duplicates.contains(&name) {
                    duplicates.push(name);
                }
            }
        }
        duplicates
    }

    /// Stamp `script` onto this node and every descendant that has none.
    pub fn fill_script(&mut self, script: &Path) {
        if self.script_path().is_none() {
            self.script = Some(script.to_path_buf());
        }
        for child in self.sub_contexts.values_mut() {
            Arc::make_mut(child).fill_script(script);
        }
    }

    /// Structural checks applied to decoded trees.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if !is_context_letter(self.letter) {
            return Err(DefinitionError::InvalidContextLetter(format!(
                "-{}",
                self.letter
            )));
        }
        for flag in &self.flags {
            if !flag.has_name() {
                return Err(DefinitionError::FlagWithoutName(flag.description.clone()));
            }
        }
        for (key, child) in &self.sub_contexts {
            if *key != child.letter {
                return Err(DefinitionError::MismatchedSubContext {
                    key: *key,
                    letter: child.letter,
                });
            }
            child.validate()?;
        }
        Ok(())
    }
}

/// Context letters are the uppercase ASCII letters.
pub fn is_context_letter(ch: char) -> bool {
    ch.is_ascii_uppercase()
}

/// Render a context path as the letters a user would type after `-`.
pub fn format_path(path: &[char]) -> String {
    path.iter().collect()
}
