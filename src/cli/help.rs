//! CLI help: top-level and per-context help text.

use crate::context::{format_path, ContextNode, Flag};
use crate::error::WshError;
use crate::registry::ContextRegistry;
use crate::resolve::ParseResult;
use std::fmt::Write;
use std::sync::Arc;

/// Help for the context at `path`; an empty path renders the top-level help.
///
/// Fails with `UnknownContext` naming the first letter that does not resolve.
pub fn render_help(registry: &ContextRegistry, path: &[char]) -> Result<String, WshError> {
    if path.is_empty() {
        return Ok(top_level_help(registry));
    }
    match registry.lookup(path) {
        Some(node) => Ok(context_help(&node, path)),
        None => Err(WshError::UnknownContext(first_unresolved(registry, path))),
    }
}

/// Help for a resolved command line.
///
/// A long root name after another context (`-A --time`) leaves a path that
/// does not walk the registry; the help then addresses the resolved node from
/// the root it was reached through.
pub fn render_resolved_help(
    registry: &ContextRegistry,
    result: &ParseResult,
) -> Result<String, WshError> {
    let path = &result.context_path;
    match &result.context {
        Some(node) if !path.is_empty() && registry.lookup(path).is_none() => {
            let start = (0..path.len()).find(|&i| {
                registry
                    .lookup(&path[i..])
                    .is_some_and(|found| Arc::ptr_eq(&found, node))
            });
            match start {
                Some(i) => Ok(context_help(node, &path[i..])),
                None => Ok(context_help(node, &[node.letter])),
            }
        }
        _ => render_help(registry, path),
    }
}

fn first_unresolved(registry: &ContextRegistry, path: &[char]) -> char {
    (1..=path.len())
        .find(|len| registry.lookup(&path[..*len]).is_none())
        .map(|len| path[len - 1])
        .unwrap_or(path[0])
}

fn top_level_help(registry: &ContextRegistry) -> String {
    let mut out = String::new();
    out.push_str("Usage: wsh [OPTIONS] [COMMAND]\n\n");
    out.push_str("A shell wrapper with self-describing plugins\n\n");
    out.push_str("Options:\n");
    out.push_str(&flag_line(&help_flag()));
    out.push_str("\nContexts:\n");
    for node in registry.sorted_roots() {
        out.push_str(&context_line(&node));
    }
    out.push_str("\nUse 'wsh -<context>h' or 'wsh --<context> --help' for context-specific help\n");
    out
}

fn context_help(node: &ContextNode, path: &[char]) -> String {
    let path = format_path(path);
    let mut out = String::new();
    let _ = writeln!(out, "Usage: wsh -{} [OPTIONS] [ARGS]\n", path);
    let _ = writeln!(out, "{}\n", node.description);

    out.push_str("Options:\n");
    out.push_str(&flag_line(&help_flag()));
    for flag in &node.flags {
        out.push_str(&flag_line(flag));
    }

    if !node.sub_contexts.is_empty() {
        out.push_str("\nSub-contexts:\n");
        // BTreeMap keeps sub-contexts ordered by letter.
        for child in node.sub_contexts.values() {
            out.push_str(&context_line(child));
        }
        let _ = writeln!(out, "\nUse 'wsh -{}<subcontext>h' for sub-context help", path);
    }

    if let Some(script) = node.script_path() {
        let _ = writeln!(out, "\nPlugin script: {}", script.display());
    }
    out
}

fn help_flag() -> Flag {
    Flag::switch('h', "help", "Show this help message")
}

fn context_line(node: &ContextNode) -> String {
    format!(
        "  {:<6} {:<20} {}\n",
        format!("-{}", node.letter),
        format!("--{}", node.long),
        node.description
    )
}

fn flag_line(flag: &Flag) -> String {
    let arg = flag
        .arg_name
        .as_ref()
        .map(|name| format!(" <{}>", name))
        .unwrap_or_default();

    match (flag.short, flag.long.as_deref()) {
        (Some(short), Some(long)) => format!(
            "  -{}, {:<20} {}\n",
            short,
            format!("--{}{}", long, arg),
            flag.description
        ),
        (Some(short), None) => {
            format!("  {:<24} {}\n", format!("-{}{}", short, arg), flag.description)
        }
        (None, Some(long)) => {
            format!("  {:<24} {}\n", format!("--{}{}", long, arg), flag.description)
        }
        (None, None) => String::new(),
    }
}
