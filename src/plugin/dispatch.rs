//! Running a resolved external context.

use crate::context::ContextNode;
use crate::error::WshError;
use std::collections::BTreeMap;
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Run `node`'s script with `flags` as environment variables and `args` as
/// its arguments, returning the script's exit code.
///
/// Standard streams are inherited. Each flag is exported under its key
/// (`offline=true`, `from=5`).
pub fn dispatch(
    node: &ContextNode,
    flags: &BTreeMap<String, String>,
    args: &[String],
) -> Result<i32, WshError> {
    let script = node.script_path().ok_or_else(|| {
        WshError::ExecutionFailure(format!("no script for context -{}", node.letter))
    })?;
    if !script.exists() {
        return Err(WshError::ExecutionFailure(format!(
            "plugin script not found: {}",
            script.display()
        )));
    }

    debug!(
        letter = %node.letter,
        script = %script.display(),
        flags = flags.len(),
        args = args.len(),
        "dispatching plugin"
    );

    let status = Command::new(script)
        .args(args)
        .envs(flags)
        .status()
        .map_err(|e| {
            WshError::ExecutionFailure(format!("failed to execute {}: {}", script.display(), e))
        })?;

    Ok(exit_code_of(status))
}

#[cfg(unix)]
fn exit_code_of(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
