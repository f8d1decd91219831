//! Context Model
//!
//! A context is an addressable command scope identified by one uppercase letter.
//! It owns an ordered flag list and a map of nested sub-contexts; the chain of
//! letters from a root down to a node is that node's context path (`-TO`).

pub mod flag;
pub mod node;

pub use flag::Flag;
pub use node::{format_path, is_context_letter, ContextNode};

/// Letter of the built-in default (shell) context.
pub const SHELL_CONTEXT: char = 'S';

/// Letter of the built-in registration (args) context.
pub const ARGS_CONTEXT: char = 'A';
