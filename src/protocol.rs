//! Self-Description Protocol
//!
//! Two halves, kept independent of process launching:
//! - [`grammar`]: the token grammar a plugin passes to `wsh args --register`
//! - [`wire`]: the JSON document the registering process prints for its parent
//!
//! A plugin is run with [`ENV_BINARY`] and [`ENV_PLUGIN_SCRIPT`] set. It calls
//! `"$WSH_BINARY" args --register <definition…>`, which parses the definition
//! and prints the wire document that the parent captures and decodes.

pub mod grammar;
pub mod wire;

pub use grammar::parse_definition;
pub use wire::{decode, encode, PROTOCOL_VERSION};

/// Path of the invoking `wsh` binary, set for plugins during bootstrap.
pub const ENV_BINARY: &str = "WSH_BINARY";

/// The plugin's own script path, set for plugins during bootstrap.
pub const ENV_PLUGIN_SCRIPT: &str = "WSH_PLUGIN_SCRIPT";

/// Override for the plugin directory.
pub const ENV_PLUGIN_DIR: &str = "WSH_PLUGIN_DIR";

/// Name of the leftover-arguments line printed by `wsh args`.
pub const ENV_ARGS: &str = "WSH_ARGS";
