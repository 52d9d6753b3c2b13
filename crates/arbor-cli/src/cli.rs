//! Command-line argument parsing with clap.
//!
//! Only the global options are declared to clap. The verb path and its
//! arguments are collected verbatim and dispatched through the verb
//! registry, which owns the command grammar.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Overrides;

/// Token appended by the host shell to request completions.
pub const COMPLETION_TOKEN: &str = "--generate-bash-completion";

/// arboradm - administrative client for the arbor configuration tree.
#[derive(Parser, Debug, Clone)]
#[command(name = "arboradm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the arbor REST API.
    #[arg(long, env = "ARBOR_API_URL")]
    pub api_url: Option<String>,

    /// User for HTTP basic authentication.
    #[arg(short, long, env = "ARBOR_USER")]
    pub user: Option<String>,

    /// Password for HTTP basic authentication.
    #[arg(long, env = "ARBOR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "ARBOR_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Configuration file to read instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Print completion candidates for the given tokens instead of running.
    #[arg(long)]
    pub complete: bool,

    /// Completion marker given before any command token.
    #[arg(long = "generate-bash-completion", hide = true)]
    pub generate_bash_completion: bool,

    /// Verb path followed by the command's arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub tokens: Vec<String>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Configuration overrides given on the command line or environment.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_url: self.api_url.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            timeout: self.timeout,
            config: self.config.clone(),
        }
    }

    /// Split off the completion request.
    ///
    /// Returns whether completion was asked for, and the command tokens
    /// without the trailing shell marker.
    #[must_use]
    pub fn completion_request(&self) -> (bool, &[String]) {
        match self.tokens.split_last() {
            Some((last, rest)) if last == COMPLETION_TOKEN => (true, rest),
            _ => (self.complete || self.generate_bash_completion, &self.tokens),
        }
    }
}
