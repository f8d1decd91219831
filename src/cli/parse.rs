//! CLI parse: clap types for the `args` sub-command.
//!
//! The main command line is resolved against the context registry, not clap.

use clap::Parser;

/// Argument parser operations for plugins and shell functions
#[derive(Parser, Debug)]
#[command(name = "wsh args")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct ArgsCli {
    /// Parse a self-description and print its registration document
    #[arg(long)]
    pub register: bool,

    /// Definition tokens (with --register) or command-line tokens to resolve
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

impl ArgsCli {
    /// Parse the words after `args`.
    ///
    /// clap treats a leading `--` as its own escape and drops it; here it is
    /// kept as a token so `wsh args` resolves exactly what `wsh` would.
    pub fn parse_tokens(rest: &[String]) -> Result<Self, clap::Error> {
        if rest.first().map(String::as_str) == Some("--") {
            return Ok(Self {
                register: false,
                tokens: rest.to_vec(),
            });
        }
        let argv = std::iter::once("wsh args").chain(rest.iter().map(String::as_str));
        Self::try_parse_from(argv)
    }
}
