//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Urzędnicy - import the register of officials into Wikibase.
#[derive(Debug, Parser)]
#[command(name = "urzednicy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.urzednicy/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (ids only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import persons from an XML register
    Import(ImportArgs),

    /// Show how date expressions are normalized and encoded
    Date(DateArgs),

    /// Manage endpoint profiles
    Profile(ProfileArgs),
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// XML file with person records
    pub file: PathBuf,

    /// Map records against an in-memory store and print the items instead of writing
    #[arg(long)]
    pub dry_run: bool,

    /// Import at most this many records
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// TOML file overriding property and item ids
    #[arg(long)]
    pub vocabulary: Option<PathBuf>,

    /// Bot user name
    #[arg(long, env = "BOT_NAME")]
    pub bot_name: Option<String>,

    /// Bot password
    #[arg(long, env = "BOT_PASSWORD", hide_env_values = true)]
    pub bot_password: Option<String>,
}

/// Arguments for the date command.
#[derive(Debug, Parser)]
pub struct DateArgs {
    /// Date expressions, e.g. "ok. 1450" or "XV w."
    #[arg(required = true)]
    pub texts: Vec<String>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// URL of api.php
        #[arg(short, long)]
        url: String,
        /// Search language
        #[arg(short = 'L', long, default_value = "pl")]
        language: String,
        /// Custom User-Agent
        #[arg(long)]
        user_agent: Option<String>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
