//! Shell session behind the default `-S` context.
//!
//! Only the hand-off is modelled here: wsh resolves its own flags, then
//! passes a one-shot command or an interactive session to a real shell.

use crate::config::ShellConfig;
use crate::error::WshError;
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Runs commands or interactive sessions on behalf of the `S` context.
pub trait ShellSession {
    /// Run `command` once with `args` as its positional parameters.
    fn run_command(&mut self, command: &str, args: &[String]) -> Result<i32, WshError>;

    /// Hand the terminal to an interactive session.
    fn run_interactive(&mut self, args: &[String]) -> Result<i32, WshError>;
}

/// Delegates to a system shell program.
#[derive(Debug, Clone)]
pub struct SystemShell {
    program: String,
}

impl SystemShell {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Program from config, else `$SHELL`, else `/bin/sh`.
    pub fn from_config(config: &ShellConfig) -> Self {
        let program = config
            .program
            .clone()
            .or_else(|| std::env::var("SHELL").ok().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| "/bin/sh".to_string());
        Self::new(program)
    }

    fn wait(&self, cmd: &mut Command) -> Result<i32, WshError> {
        let status = cmd.status().map_err(|e| {
            WshError::ExecutionFailure(format!("failed to start {}: {}", self.program, e))
        })?;
        Ok(code_of(status))
    }
}

impl ShellSession for SystemShell {
    fn run_command(&mut self, command: &str, args: &[String]) -> Result<i32, WshError> {
        debug!(program = %self.program, command, "running one-shot command");
        // `sh -c cmd name args…`: the first argument after the command is $0.
        let mut cmd = Command::new(&self.program);
        cmd.arg("-c").arg(command).arg("wsh").args(args);
        self.wait(&mut cmd)
    }

    fn run_interactive(&mut self, args: &[String]) -> Result<i32, WshError> {
        debug!(program = %self.program, "starting interactive shell");
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        self.wait(&mut cmd)
    }
}

#[cfg(unix)]
fn code_of(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
