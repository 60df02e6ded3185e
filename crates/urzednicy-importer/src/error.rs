//! Error types for the importer

use thiserror::Error;

/// Errors that can occur while importing records
#[derive(Error, Debug)]
pub enum ImporterError {
    /// Malformed XML source
    #[error("XML error: {0}")]
    Xml(String),

    /// Source file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record cannot be imported at all
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Entity store failure (search, create or update)
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<quick_xml::Error> for ImporterError {
    fn from(e: quick_xml::Error) -> Self {
        ImporterError::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ImporterError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        ImporterError::Xml(format!("Invalid attribute: {}", e))
    }
}

impl From<toml::de::Error> for ImporterError {
    fn from(e: toml::de::Error) -> Self {
        ImporterError::Config(format!("Failed to parse TOML: {}", e))
    }
}
