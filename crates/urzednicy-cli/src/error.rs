//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SDK error
    #[error("Wikibase error: {0}")]
    Sdk(#[from] urzednicy_sdk::SdkError),

    /// Importer error
    #[error("Import error: {0}")]
    Importer(#[from] urzednicy_importer::ImporterError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bot credentials missing for a live import
    #[error("Missing bot credentials: pass --bot-name/--bot-password or set BOT_NAME/BOT_PASSWORD")]
    MissingCredentials,

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),
}
