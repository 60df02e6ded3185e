//! Bot login and token management for the MediaWiki Action API.

use crate::error::SdkError;
use serde::Deserialize;

/// Token kinds served by `action=query&meta=tokens`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Token for `action=login`
    Login,
    /// Token for edits
    Csrf,
}

impl TokenKind {
    /// Value of the `type` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Login => "login",
            TokenKind::Csrf => "csrf",
        }
    }
}

/// Response of `action=query&meta=tokens`
#[derive(Debug, Deserialize)]
pub struct TokensResponse {
    /// Query payload
    pub query: TokensQuery,
}

/// Query payload with the requested tokens
#[derive(Debug, Deserialize)]
pub struct TokensQuery {
    /// Token map
    pub tokens: Tokens,
}

/// Requested tokens
#[derive(Debug, Deserialize)]
pub struct Tokens {
    /// Login token
    pub logintoken: Option<String>,
    /// Edit token
    pub csrftoken: Option<String>,
}

impl TokensResponse {
    /// Extract the token of the requested kind
    pub fn token(self, kind: TokenKind) -> Result<String, SdkError> {
        let token = match kind {
            TokenKind::Login => self.query.tokens.logintoken,
            TokenKind::Csrf => self.query.tokens.csrftoken,
        };
        token.ok_or_else(|| SdkError::AuthError(format!("No {} token in response", kind.as_str())))
    }
}

/// Response of `action=login`
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// Login payload
    pub login: LoginResult,
}

/// Outcome of a login attempt
#[derive(Debug, Deserialize)]
pub struct LoginResult {
    /// `Success` or `Failed`
    pub result: String,
    /// Failure reason
    pub reason: Option<String>,
    /// Canonical user name on success
    pub lgusername: Option<String>,
}

impl LoginResponse {
    /// Fail unless the login succeeded; returns the canonical user name
    pub fn into_user(self, requested: &str) -> Result<String, SdkError> {
        if self.login.result == "Success" {
            Ok(self.login.lgusername.unwrap_or_else(|| requested.to_string()))
        } else {
            Err(SdkError::AuthError(format!(
                "Login as '{}' {}: {}",
                requested,
                self.login.result.to_lowercase(),
                self.login.reason.unwrap_or_else(|| "no reason given".to_string())
            )))
        }
    }
}

/// An authenticated bot session
///
/// The HTTP client keeps the session cookies; this holds the edit token.
#[derive(Debug, Clone)]
pub struct Session {
    /// Logged-in user name
    pub user: String,
    csrf_token: String,
}

impl Session {
    /// Create a session from a user name and edit token
    pub fn new(user: String, csrf_token: String) -> Self {
        Self { user, csrf_token }
    }

    /// The CSRF token for write actions
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}
