//! GitHub client error types

use thiserror::Error;

/// Errors that can occur during GitHub operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GitHubError {
    /// API error from GitHub
    #[error("GitHub API error ({status}): {message}")]
    Api {
        /// HTTP status code GitHub responded with
        status: u16,
        /// Message extracted from the error payload
        message: String,
    },

    /// Authentication failed (never includes token details)
    #[error("GitHub authentication failed")]
    Auth,

    /// Resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Network error occurred
    #[error("network error: {0}")]
    Network(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl GitHubError {
    /// Check if this is an auth error
    pub fn is_auth_error(&self) -> bool {
        matches!(self, GitHubError::Auth)
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, GitHubError::NotFound(_))
    }
}

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, GitHubError>;
