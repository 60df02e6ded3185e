//! Urzędnicy CLI library.
//!
//! Command-line interface for importing the register of officials into a
//! Wikibase instance: profile management, date inspection and the import
//! itself, live or as a dry run.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
