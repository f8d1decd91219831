//! Built-in contexts registered before any plugin is discovered.

use crate::context::{ContextNode, Flag, ARGS_CONTEXT, SHELL_CONTEXT};
use crate::error::WshError;
use crate::registry::ContextRegistry;

/// `-S`/`--shell`: the default context
pub fn shell_context() -> ContextNode {
    ContextNode::new(SHELL_CONTEXT, "shell", "Run the wsh shell (default)")
        .with_flag(Flag::with_value(
            'c',
            "command",
            "command",
            "Run a command and exit",
        ))
        .with_flag(Flag::switch('r', "reload", "Reload configuration and plugins"))
}

/// `-A`/`--args`: the registration sub-command
pub fn args_context() -> ContextNode {
    ContextNode::new(ARGS_CONTEXT, "args", "Argument parser operations")
        .with_flag(Flag::switch('r', "register", "Register plugin flags"))
}

/// Register every built-in context.
pub fn register_builtins(registry: &ContextRegistry) -> Result<(), WshError> {
    registry.register(shell_context())?;
    registry.register(args_context())?;
    Ok(())
}
