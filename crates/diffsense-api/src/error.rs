//! API error types and response mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diffsense_diff::DiffError;
use diffsense_github::GitHubError;
use serde_json::json;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed validation
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// A PR reference was given but no GitHub client is configured
    #[error("GitHub client not configured")]
    GitHubNotConfigured,

    /// Diff rejected before review started
    #[error(transparent)]
    Diff(#[from] DiffError),

    /// Fetching from GitHub failed
    #[error("upstream GitHub failure: {0}")]
    GitHub(#[from] GitHubError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::GitHubNotConfigured => {
                (StatusCode::INTERNAL_SERVER_ERROR, "github_not_configured")
            }
            ApiError::Diff(DiffError::TooLarge { .. }) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "diff_too_large")
            }
            ApiError::Diff(DiffError::Malformed(_)) => {
                (StatusCode::BAD_REQUEST, "malformed_diff")
            }
            ApiError::GitHub(_) => (StatusCode::BAD_GATEWAY, "github_error"),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
