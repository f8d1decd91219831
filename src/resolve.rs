//! Argument Resolution Engine
//!
//! A single left-to-right pass over the user's tokens. A cursor tracks the
//! current context; uppercase letters move it, lowercase letters and `--name`
//! tokens are matched against the cursor's flags, and anything else is kept
//! as a positional argument. No backtracking: a token is classified once.

use crate::context::{ContextNode, Flag, SHELL_CONTEXT};
use crate::error::WshError;
use crate::registry::ContextRegistry;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Outcome of resolving a command line
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Letters of the contexts traversed, e.g. `['T', 'O']`
    pub context_path: Vec<char>,
    /// Final resolved context
    pub context: Option<Arc<ContextNode>>,
    /// Flag values keyed by long name, or by short character when there is none
    pub flags: BTreeMap<String, String>,
    /// Positional arguments in order
    pub args: Vec<String>,
    pub show_help: bool,
}

impl ParseResult {
    pub fn context_letter(&self) -> Option<char> {
        self.context.as_ref().map(|ctx| ctx.letter)
    }
}

/// Resolves command lines against a registry
pub struct Resolver<'r> {
    registry: &'r ContextRegistry,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r ContextRegistry) -> Self {
        Self { registry }
    }

    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseResult, WshError> {
        let mut state = ParseState {
            registry: self.registry,
            cursor: None,
            result: ParseResult::default(),
        };

        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i].as_ref();
            let next = tokens.get(i + 1).map(|t| t.as_ref());

            let consumed = if let Some(name) = token.strip_prefix("--") {
                state.long_token(name, next)?
            } else if let Some(cluster) = token.strip_prefix('-').filter(|c| !c.is_empty()) {
                state.short_cluster(cluster, next)?
            } else {
                state.result.args.push(token.to_string());
                1
            };
            i += consumed;
        }

        debug!(
            path = %crate::context::format_path(&state.result.context_path),
            flags = state.result.flags.len(),
            args = state.result.args.len(),
            help = state.result.show_help,
            "resolved command line"
        );
        Ok(state.result)
    }
}

struct ParseState<'r> {
    registry: &'r ContextRegistry,
    cursor: Option<Arc<ContextNode>>,
    result: ParseResult,
}

impl<'r> ParseState<'r> {
    /// Handle `--name`; returns how many tokens were consumed.
    fn long_token(&mut self, name: &str, next: Option<&str>) -> Result<usize, WshError> {
        if name == "help" {
            self.result.show_help = true;
            return Ok(1);
        }

        self.default_to_shell();

        if let Some(flag) = self
            .cursor
            .as_ref()
            .and_then(|ctx| ctx.flag_by_long(name))
            .cloned()
        {
            return self.record_value(&flag, next, || format!("--{}", name));
        }

        let sub = self
            .cursor
            .as_ref()
            .and_then(|ctx| ctx.sub_context_by_long(name))
            .cloned();
        if let Some(ctx) = sub.or_else(|| self.registry.root_by_long(name)) {
            self.result.context_path.push(ctx.letter);
            self.enter(ctx);
            return Ok(1);
        }

        Err(WshError::UnknownFlag(format!("--{}", name)))
    }

    /// Handle `-xyz`; returns how many tokens were consumed.
    fn short_cluster(&mut self, cluster: &str, next: Option<&str>) -> Result<usize, WshError> {
        let chars: Vec<char> = cluster.chars().collect();

        for (idx, &ch) in chars.iter().enumerate() {
            if ch == 'h' {
                self.result.show_help = true;
                continue;
            }

            if ch.is_ascii_uppercase() {
                self.switch_context(ch)?;
                continue;
            }

            self.default_to_shell();
            let flag = self
                .cursor
                .as_ref()
                .and_then(|ctx| ctx.flag_by_short(ch))
                .cloned()
                .ok_or_else(|| WshError::UnknownFlag(format!("-{}", ch)))?;

            if flag.takes_value() {
                if idx + 1 < chars.len() {
                    return Err(WshError::MissingFlagArgument(format!("-{}", ch)));
                }
                return self.record_value(&flag, next, || format!("-{}", ch));
            }

            self.result.flags.insert(flag.key(), "true".to_string());
        }

        Ok(1)
    }

    /// Uppercase letter: sub-context of the cursor extends the path; a root resets it.
    fn switch_context(&mut self, letter: char) -> Result<(), WshError> {
        let sub = self
            .cursor
            .as_ref()
            .and_then(|ctx| ctx.sub_context(letter))
            .cloned();
        if let Some(ctx) = sub {
            self.result.context_path.push(letter);
            self.enter(ctx);
            return Ok(());
        }

        let root = self
            .registry
            .root(letter)
            .ok_or(WshError::UnknownContext(letter))?;
        self.result.context_path = vec![letter];
        self.enter(root);
        Ok(())
    }

    fn record_value(
        &mut self,
        flag: &Flag,
        next: Option<&str>,
        spelled: impl FnOnce() -> String,
    ) -> Result<usize, WshError> {
        if !flag.takes_value() {
            self.result.flags.insert(flag.key(), "true".to_string());
            return Ok(1);
        }
        let value = next.ok_or_else(|| WshError::MissingFlagArgument(spelled()))?;
        self.result.flags.insert(flag.key(), value.to_string());
        Ok(2)
    }

    fn enter(&mut self, ctx: Arc<ContextNode>) {
        self.result.context = Some(Arc::clone(&ctx));
        self.cursor = Some(ctx);
    }

    /// Flags seen before any context apply to the built-in shell context.
    fn default_to_shell(&mut self) {
        if self.cursor.is_none() {
            if let Some(shell) = self.registry.root(SHELL_CONTEXT) {
                self.enter(shell);
            }
        }
    }
}
