//! CLI domain: parse, route, help, and output only.
//! Context resolution and plugin work live in their own modules; the route
//! table decides which of them an invocation reaches.

mod help;
mod output;
mod parse;
mod route;

pub use help::{render_help, render_resolved_help};
pub use output::{exit_code, map_error, warning, EXIT_EXECUTION_FAILURE};
pub use parse::ArgsCli;
pub use route::{Outcome, RunContext};
