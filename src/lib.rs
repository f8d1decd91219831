//! wsh: a shell wrapper with self-describing plugins
//!
//! Plugins are executables that describe their own command-line surface: a
//! context letter, flags, and nested sub-contexts. At startup every plugin is
//! asked to describe itself, the answers are collected into a
//! [`registry::ContextRegistry`], and the user's command line is resolved
//! against that tree by [`resolve::Resolver`].

pub mod builtin;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod plugin;
pub mod protocol;
pub mod registry;
pub mod resolve;
pub mod shell;
