//! Error types for backend access

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when calling the generation backend
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ProviderError {
    /// The call exceeded its deadline and was cancelled
    #[error("backend timed out after {0:?}")]
    Timeout(Duration),

    /// Retries exhausted; carries the last underlying error for diagnostics
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Backend replied with something we could not decode
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),

    /// Client was constructed with unusable configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::InvalidResponse(err.to_string())
    }
}
