//! Shared test utilities for integration tests
//!
//! Plugin fixtures are real `/bin/sh` scripts. Tests that run the built binary
//! get an isolated environment: their own plugin directory and config home,
//! and none of the `WSH_*` variables of the surrounding process.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path of the `wsh` binary built for this test run
pub fn wsh_bin() -> &'static str {
    env!("CARGO_BIN_EXE_wsh")
}

/// Write an executable `/bin/sh` script into `dir`.
pub fn write_plugin(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    make_executable(&path);
    path
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// A plugin that registers `definition` when bootstrapped and otherwise runs `body`.
pub fn write_described_plugin(dir: &Path, name: &str, definition: &str, body: &str) -> PathBuf {
    write_plugin(
        dir,
        name,
        &format!(
            "if [ -n \"$WSH_BINARY\" ]; then\n  exec \"$WSH_BINARY\" args --register {}\nfi\n{}",
            definition, body
        ),
    )
}

/// The time-tracking plugin used across scenarios: `-T` with `-o`, `-f <days>`,
/// and a `-O` overtime sub-context with `-s <time>`. When run it echoes what it
/// received.
pub fn write_time_plugin(dir: &Path) -> PathBuf {
    write_described_plugin(
        dir,
        "time.sh",
        "-T --time 'Time tracking' \
         -o --offline 'Offline mode' \
         -f --from days 'Days ago' \
         -O --overtime 'Overtime calculations' \
         -s --start time 'Start time'",
        "echo \"offline=$offline from=$from start=$start args=$*\"",
    )
}

/// Isolated workspace for one binary invocation
pub struct TestEnv {
    pub root: TempDir,
    pub plugins: PathBuf,
    pub config_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let plugins = root.path().join("plugins");
        let config_home = root.path().join("config");
        fs::create_dir_all(&plugins).unwrap();
        fs::create_dir_all(&config_home).unwrap();
        Self {
            root,
            plugins,
            config_home,
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(wsh_bin());
        cmd.env("WSH_PLUGIN_DIR", &self.plugins)
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env("SHELL", "/bin/sh")
            .env_remove("WSH_BINARY")
            .env_remove("WSH_PLUGIN_SCRIPT")
            .env_remove("WSH_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().unwrap()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
