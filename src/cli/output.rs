//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::WshError;

/// Exit code when a resolved context could not be run at all.
///
/// Sits outside the 1 and 2 that scripts commonly use for their own failures.
pub const EXIT_EXECUTION_FAILURE: i32 = 125;

/// Map domain errors to the line printed on stderr.
pub fn map_error(e: &WshError) -> String {
    format!("wsh: {}", e)
}

/// Format a non-fatal problem for stderr.
pub fn warning(message: impl std::fmt::Display) -> String {
    format!("wsh: warning: {}", message)
}

/// Process exit code for an error that ends the invocation.
pub fn exit_code(e: &WshError) -> i32 {
    match e {
        WshError::ExecutionFailure(_) => EXIT_EXECUTION_FAILURE,
        _ => 1,
    }
}
