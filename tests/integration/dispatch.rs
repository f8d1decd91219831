//! End-to-end runs of the binary: bootstrap, resolve, then help, shell, or plugin.

use super::test_utils::{
    stderr, stdout, write_described_plugin, write_plugin, write_time_plugin, TestEnv,
};

#[test]
fn test_plugin_receives_flags_and_args() {
    let env = TestEnv::new();
    write_time_plugin(&env.plugins);

    let output = env.run(&["-Tof", "5", "report"]);

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(
        stdout(&output).trim(),
        "offline=true from=5 start= args=report"
    );
}

#[test]
fn test_long_form_reaches_sub_context() {
    let env = TestEnv::new();
    write_time_plugin(&env.plugins);

    let output = env.run(&["--time", "--overtime", "--start", "09:00"]);

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "offline= from= start=09:00 args=");
}

#[test]
fn test_plugin_exit_code_is_propagated() {
    let env = TestEnv::new();
    write_described_plugin(&env.plugins, "fail.sh", "-F --fail 'Always fails'", "exit 42");

    let output = env.run(&["-F"]);
    assert_eq!(output.status.code(), Some(42));
}

#[test]
fn test_missing_script_exits_with_execution_failure_code() {
    let env = TestEnv::new();
    write_plugin(
        &env.plugins,
        "ghost.sh",
        "WSH_PLUGIN_SCRIPT=/nonexistent/ghost.sh exec \"$WSH_BINARY\" args --register -G --ghost 'Gone'",
    );

    let output = env.run(&["-G"]);

    assert_eq!(output.status.code(), Some(125));
    assert!(stderr(&output).contains("plugin script not found"));
}

#[test]
fn test_context_help_shows_plugin_script() {
    let env = TestEnv::new();
    let script = write_time_plugin(&env.plugins);

    let output = env.run(&["-Th"]);

    assert!(output.status.success());
    let help = stdout(&output);
    assert!(help.starts_with("Usage: wsh -T [OPTIONS] [ARGS]"));
    assert!(help.contains("--from <days>"));
    assert!(help.contains("--overtime"));
    assert!(help.contains(&format!("Plugin script: {}", script.display())));
}

#[test]
fn test_help_after_switching_root_by_long_name() {
    let env = TestEnv::new();
    write_time_plugin(&env.plugins);

    let output = env.run(&["-A", "--time", "-h"]);

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(stdout(&output).starts_with("Usage: wsh -T [OPTIONS] [ARGS]"));
}

#[test]
fn test_top_level_help_lists_plugins_and_builtins() {
    let env = TestEnv::new();
    write_time_plugin(&env.plugins);

    let output = env.run(&["--help"]);

    assert!(output.status.success());
    let help = stdout(&output);
    assert!(help.contains("--args"));
    assert!(help.contains("--shell"));
    assert!(help.contains("--time"));
}

#[test]
fn test_unknown_context_fails_without_running_anything() {
    let env = TestEnv::new();
    let output = env.run(&["-X"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("unknown context: -X"));
}

#[test]
fn test_value_flag_inside_cluster_fails() {
    let env = TestEnv::new();
    write_time_plugin(&env.plugins);

    let output = env.run(&["-Tfo", "5"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("requires an argument"));
}

#[test]
fn test_shell_command_runs_through_system_shell() {
    let env = TestEnv::new();
    let output = env.run(&["-c", "echo from-shell"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "from-shell");
}

#[test]
fn test_broken_plugin_is_only_a_warning() {
    let env = TestEnv::new();
    write_plugin(&env.plugins, "broken.sh", "echo not-json");
    write_time_plugin(&env.plugins);

    let output = env.run(&["-To"]);

    assert!(output.status.success());
    assert!(stderr(&output).contains("wsh: warning: plugin broken.sh"));
    assert!(stdout(&output).contains("offline=true"));
}

#[test]
fn test_reload_reports_plugins() {
    let env = TestEnv::new();
    write_time_plugin(&env.plugins);

    let output = env.run(&["-Sr"]);

    assert!(output.status.success(), "stderr={}", stderr(&output));
    let summary = stdout(&output);
    assert!(summary.starts_with("Reloaded 1 plugin(s)"));
    assert!(summary.contains("--time"));
}
