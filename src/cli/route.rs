//! CLI route: single route table and run context.
//!
//! ```text
//! wsh args --register <definition…>   describe a plugin, print its document
//! wsh args <tokens…>                  resolve tokens, print name=value lines
//! wsh [tokens…]                       resolve, then help | shell | plugin
//! ```

use crate::builtin::register_builtins;
use crate::cli::help::render_resolved_help;
use crate::cli::output::{exit_code, map_error, warning};
use crate::cli::parse::ArgsCli;
use crate::config::{ConfigLoader, WshConfig};
use crate::context::{ContextNode, SHELL_CONTEXT};
use crate::error::WshError;
use crate::plugin::{self, BootstrapReport};
use crate::protocol::{self, ENV_ARGS, ENV_BINARY, ENV_PLUGIN_SCRIPT};
use crate::registry::ContextRegistry;
use crate::resolve::{ParseResult, Resolver};
use crate::shell::{ShellSession, SystemShell};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// What a routed invocation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text for standard output, then exit 0
    Output(String),
    /// Exit code of a shell session or dispatched plugin
    Exit(i32),
}

/// Runtime context for CLI execution: configuration and the running binary's path.
pub struct RunContext {
    config: WshConfig,
    binary: PathBuf,
}

impl RunContext {
    pub fn new(config: WshConfig, binary: impl Into<PathBuf>) -> Self {
        Self {
            config,
            binary: binary.into(),
        }
    }

    pub fn config(&self) -> &WshConfig {
        &self.config
    }

    /// Route `argv` (without the program name), print the result, and return
    /// the process exit code.
    pub fn run(&self, argv: &[String]) -> i32 {
        let mut shell = SystemShell::from_config(&self.config.shell);
        match self.execute(argv, &mut shell) {
            Ok(Outcome::Output(text)) => {
                print!("{}", text);
                0
            }
            Ok(Outcome::Exit(code)) => code,
            Err(e) => {
                error!(error = %e, "command failed");
                eprintln!("{}", map_error(&e));
                exit_code(&e)
            }
        }
    }

    /// Route `argv` to the `args` sub-command or the main resolution path.
    pub fn execute(
        &self,
        argv: &[String],
        shell: &mut dyn ShellSession,
    ) -> Result<Outcome, WshError> {
        match argv.split_first() {
            Some((first, rest)) if first == "args" => self.execute_args(rest),
            _ => self.execute_main(argv, shell),
        }
    }

    fn execute_args(&self, rest: &[String]) -> Result<Outcome, WshError> {
        let cli = ArgsCli::parse_tokens(rest).map_err(|e| WshError::Config(e.to_string()))?;

        if cli.register {
            let script = std::env::var_os(ENV_PLUGIN_SCRIPT).map(PathBuf::from);
            return self.register(&cli.tokens, script.as_deref()).map(Outcome::Output);
        }
        if cli.tokens.is_empty() {
            return Err(WshError::Config("wsh args: no arguments provided".to_string()));
        }
        self.resolve_for_shell(&cli.tokens).map(Outcome::Output)
    }

    /// `wsh args --register`: parse a self-description and return its wire document.
    ///
    /// A plugin claiming `-S` or `-A` is warned about on stderr; the document
    /// is still printed and the parent's registry rejects it.
    pub fn register(&self, tokens: &[String], script: Option<&Path>) -> Result<String, WshError> {
        let node = protocol::parse_definition(tokens, script)?;

        if let Some(conflict) = builtin_conflict(&node)? {
            eprintln!("{}", warning(&conflict));
        }

        let mut document = protocol::encode(&node)?;
        document.push('\n');
        Ok(document)
    }

    /// `wsh args <tokens…>`: resolve and format as `name=value` lines.
    pub fn resolve_for_shell(&self, tokens: &[String]) -> Result<String, WshError> {
        let registry = self.registry_with_plugins()?;
        let result = Resolver::new(&registry).parse(tokens)?;
        Ok(shell_assignments(&result))
    }

    fn execute_main(
        &self,
        argv: &[String],
        shell: &mut dyn ShellSession,
    ) -> Result<Outcome, WshError> {
        let registry = self.registry_with_plugins()?;
        let result = Resolver::new(&registry).parse(argv)?;
        debug!(
            path = ?result.context_path,
            context = ?result.context_letter(),
            help = result.show_help,
            "resolved command line"
        );

        if result.show_help {
            return render_resolved_help(&registry, &result).map(Outcome::Output);
        }

        let node = match &result.context {
            None => return self.run_shell(&result, shell),
            Some(node) if node.letter == SHELL_CONTEXT && node.is_builtin() => {
                return self.run_shell(&result, shell)
            }
            Some(node) => node,
        };

        if node.is_builtin() {
            return Err(WshError::ExecutionFailure(format!(
                "context -{} cannot be run directly",
                node.letter
            )));
        }
        plugin::dispatch(node, &result.flags, &result.args).map(Outcome::Exit)
    }

    fn run_shell(
        &self,
        result: &ParseResult,
        shell: &mut dyn ShellSession,
    ) -> Result<Outcome, WshError> {
        if let Some(command) = result.flags.get("command") {
            return shell.run_command(command, &result.args).map(Outcome::Exit);
        }
        if result.flags.contains_key("reload") {
            return self.reload().map(Outcome::Output);
        }
        shell.run_interactive(&result.args).map(Outcome::Exit)
    }

    /// Re-read configuration and describe every plugin again.
    fn reload(&self) -> Result<String, WshError> {
        let config = ConfigLoader::load()?;
        let registry = ContextRegistry::new();
        register_builtins(&registry)?;
        let report = plugin::load_plugins(&registry, &self.binary, &config.plugins)?;
        print_warnings(&report);

        let mut summary = String::new();
        let _ = writeln!(
            summary,
            "Reloaded {} plugin(s) from {}",
            report.registered.len(),
            plugin::resolve_plugin_dir(config.plugins.dir.as_deref()).display()
        );
        for node in registry.sorted_roots() {
            let _ = writeln!(summary, "  -{}  --{}  {}", node.letter, node.long, node.description);
        }
        Ok(summary)
    }

    /// Built-ins plus every plugin that described itself.
    ///
    /// Inside a bootstrap (`WSH_BINARY` set) plugins are not loaded again, so a
    /// plugin that calls back into wsh cannot recurse.
    fn registry_with_plugins(&self) -> Result<ContextRegistry, WshError> {
        let registry = ContextRegistry::new();
        register_builtins(&registry)?;

        if inside_bootstrap() {
            debug!("called from a plugin bootstrap; skipping plugin loading");
            return Ok(registry);
        }

        match plugin::load_plugins(&registry, &self.binary, &self.config.plugins) {
            Ok(report) => {
                info!(registered = report.registered.len(), "plugins loaded");
                print_warnings(&report);
            }
            Err(e) => eprintln!("{}", warning(format!("plugin loading failed: {}", e))),
        }
        Ok(registry)
    }
}

/// A registered definition never counts as a built-in, even without a script.
fn builtin_conflict(node: &ContextNode) -> Result<Option<WshError>, WshError> {
    let builtins = ContextRegistry::new();
    register_builtins(&builtins)?;
    Ok(builtins
        .root(node.letter)
        .map(|existing| WshError::RegistrationConflict {
            letter: node.letter,
            existing: existing.script_label(),
            rejected: node
                .script_path()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "wsh args --register".to_string()),
        }))
}

fn inside_bootstrap() -> bool {
    std::env::var_os(ENV_BINARY).is_some()
}

fn print_warnings(report: &BootstrapReport) {
    for failure in &report.failures {
        eprintln!("{}", warning(failure));
    }
    for conflict in &report.conflicts {
        eprintln!("{}", warning(conflict));
    }
}

/// `name=value` per flag in key order, then `WSH_ARGS=<positional args>`.
pub(crate) fn shell_assignments(result: &ParseResult) -> String {
    let mut out = String::new();
    for (key, value) in &result.flags {
        let _ = writeln!(out, "{}={}", key, value);
    }
    let _ = writeln!(out, "{}={}", ENV_ARGS, result.args.join(" "));
    out
}
