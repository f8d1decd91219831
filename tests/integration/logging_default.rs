//! Integration tests for default logging behavior.
//!
//! Logging is off unless asked for, so plugin output and `args` documents on
//! stdout/stderr stay clean.

use super::test_utils::{stderr, stdout, TestEnv};
use std::fs;

#[test]
fn test_default_logging_is_silent() {
    let env = TestEnv::new();
    let output = env.run(&["-c", "echo hi"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "hi\n");
    assert!(
        stderr(&output).is_empty(),
        "nothing should be logged by default: {}",
        stderr(&output)
    );
}

#[test]
fn test_wsh_log_writes_to_stderr() {
    let env = TestEnv::new();
    let output = env
        .command()
        .env("WSH_LOG", "info")
        .env_remove("WSH_LOG_OUTPUT")
        .env_remove("WSH_LOG_FORMAT")
        .args(["-c", "true"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stderr(&output).contains("wsh starting"));
}

#[test]
fn test_configured_log_file() {
    let env = TestEnv::new();
    let log_path = env.root.path().join("logs").join("wsh.log");
    fs::create_dir_all(env.config_home.join("wsh")).unwrap();
    fs::write(
        env.config_home.join("wsh").join("config.toml"),
        format!(
            "[logging]\nlevel = \"info\"\noutput = \"file\"\nformat = \"json\"\nfile = {:?}\n",
            log_path.display().to_string()
        ),
    )
    .unwrap();

    let output = env
        .command()
        .env_remove("WSH_LOG_OUTPUT")
        .env_remove("WSH_LOG_FORMAT")
        .args(["-c", "true"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr={}",
        stderr(&output)
    );
    assert!(stderr(&output).is_empty());
    let content = fs::read_to_string(&log_path).unwrap();
    assert!(
        content.contains("wsh starting"),
        "log file should contain a startup message; got: {}",
        content.lines().next().unwrap_or("")
    );
}

#[test]
fn test_stdout_logging_stays_out_of_args_output() {
    let env = TestEnv::new();
    fs::create_dir_all(env.config_home.join("wsh")).unwrap();
    fs::write(
        env.config_home.join("wsh").join("config.toml"),
        "[logging]\nlevel = \"info\"\noutput = \"stdout\"\n",
    )
    .unwrap();

    let output = env
        .command()
        .env_remove("WSH_LOG_OUTPUT")
        .env_remove("WSH_LOG_FORMAT")
        .args(["args", "-c", "ls"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(stdout(&output), "command=ls\nWSH_ARGS=\n");
    assert!(stderr(&output).contains("wsh starting"));
}
