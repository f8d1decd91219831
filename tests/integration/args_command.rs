//! `wsh args`: the registration and shell-parsing surface of the binary.

use super::test_utils::{stderr, stdout, write_time_plugin, TestEnv};
use wsh::protocol;

#[test]
fn test_register_prints_wire_document() {
    let env = TestEnv::new();
    let output = env
        .command()
        .env("WSH_PLUGIN_SCRIPT", "/plugins/time.sh")
        .args([
            "args", "--register",
            "-T", "--time", "Time tracking",
            "-o", "--offline", "Offline mode",
            "-f", "--from", "days", "Days ago",
            "-O", "--overtime", "Overtime calculations",
            "-s", "--start", "time", "Start time",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr={}", stderr(&output));
    let node = protocol::decode(&stdout(&output)).unwrap();
    assert_eq!(node.letter, 'T');
    assert_eq!(node.long, "time");
    assert_eq!(node.flags.len(), 2);
    assert_eq!(node.script_label(), "/plugins/time.sh");

    let overtime = node.sub_context('O').unwrap();
    assert_eq!(overtime.flags[0].arg_name.as_deref(), Some("time"));
    assert_eq!(overtime.script_label(), "/plugins/time.sh");
}

#[test]
fn test_register_rejects_lowercase_context() {
    let env = TestEnv::new();
    let output = env.run(&["args", "--register", "-t", "--time", "Time"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("capital letter"));
}

#[test]
fn test_register_builtin_letter_warns_but_succeeds() {
    let env = TestEnv::new();
    let output = env.run(&["args", "--register", "-S", "--sync", "Sync files"]);

    assert!(output.status.success());
    assert!(stderr(&output).contains("wsh: warning:"));
    assert!(stderr(&output).contains("-S already registered by <built-in>"));
    assert_eq!(protocol::decode(&stdout(&output)).unwrap().long, "sync");
}

#[test]
fn test_parse_prints_assignments_for_plugin_context() {
    let env = TestEnv::new();
    write_time_plugin(&env.plugins);

    let output = env.run(&["args", "-Tof", "5", "report", "today"]);

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "from=5\noffline=true\nWSH_ARGS=report today\n"
    );
}

#[test]
fn test_parse_shell_flags_without_plugins() {
    let env = TestEnv::new();
    let output = env.run(&["args", "-c", "ls -la"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "command=ls -la\nWSH_ARGS=\n");
}

#[test]
fn test_parse_unknown_flag_fails() {
    let env = TestEnv::new();
    let output = env.run(&["args", "-z"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown flag"));
}

#[test]
fn test_args_without_arguments_fails() {
    let env = TestEnv::new();
    let output = env.run(&["args"]);
    assert_eq!(output.status.code(), Some(1));
}
