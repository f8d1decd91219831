//! wsh CLI Binary
//!
//! Shell front end whose command line is assembled from self-describing plugins.

use anyhow::Context;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn};
use wsh::cli::RunContext;
use wsh::config::{ConfigLoader, WshConfig};
use wsh::logging::init_logging;

fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let (config, config_error) = match ConfigLoader::load() {
        Ok(config) => (config, None),
        Err(e) => (WshConfig::default(), Some(e)),
    };

    // `wsh args` prints documents and assignments that other processes parse.
    let stdout_reserved = argv.first().map(String::as_str) == Some("args");
    if let Err(e) = init_logging(Some(&config.logging), stdout_reserved) {
        eprintln!("wsh: failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(args = argv.len(), "wsh starting");
    if let Some(e) = config_error {
        warn!(error = %e, "falling back to default configuration");
        eprintln!("{}", wsh::cli::warning(format!("{}; using defaults", e)));
    }

    let context = match build_run_context(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing wsh: {:#}", e);
            eprintln!("wsh: {:#}", e);
            process::exit(1);
        }
    };

    process::exit(context.run(&argv));
}

fn build_run_context(config: WshConfig) -> anyhow::Result<RunContext> {
    let binary = current_binary().context("cannot determine the path of the wsh binary")?;
    Ok(RunContext::new(config, binary))
}

/// Path plugins use to call back into wsh: the running executable, else an
/// absolute form of `argv[0]`.
fn current_binary() -> anyhow::Result<PathBuf> {
    if let Ok(path) = std::env::current_exe() {
        return Ok(path);
    }
    let arg0 = std::env::args_os()
        .next()
        .map(PathBuf::from)
        .context("argv[0] is missing")?;
    if arg0.is_absolute() {
        return Ok(arg0);
    }
    Ok(std::env::current_dir()
        .context("cannot read the current directory")?
        .join(arg0))
}
