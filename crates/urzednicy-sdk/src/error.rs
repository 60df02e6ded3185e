//! Error types for the Wikibase SDK.

use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// The API answered with an `error` object
    #[error("API error {code}: {info}")]
    ApiError {
        /// MediaWiki error code
        code: String,
        /// Human readable message
        info: String,
    },

    /// HTTP level failure
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Connection error (network, DNS, timeout)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Login or token error
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Entity does not exist
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Write attempted without a session (login() must be called first)
    #[error("Client not logged in - call login() first")]
    NotLoggedIn,
}

impl SdkError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            SdkError::ConnectionError(_) => true,
            SdkError::ApiError { code, .. } => code == "maxlag" || code == "ratelimited",
            _ => false,
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::ConnectionError(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) if status.is_server_error() => {
                    SdkError::ConnectionError(format!("Server error (HTTP {})", status))
                }
                Some(status) => SdkError::HttpError(format!("HTTP {}: {}", status, e)),
                None => SdkError::HttpError(e.to_string()),
            }
        } else if e.is_decode() {
            SdkError::InvalidResponse(e.to_string())
        } else {
            SdkError::HttpError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(SdkError::ConnectionError("reset".into()).is_transient());
        assert!(SdkError::ApiError {
            code: "maxlag".into(),
            info: "Waiting for db".into()
        }
        .is_transient());
        assert!(!SdkError::ApiError {
            code: "badtoken".into(),
            info: "Invalid CSRF token".into()
        }
        .is_transient());
        assert!(!SdkError::NotLoggedIn.is_transient());
    }
}
