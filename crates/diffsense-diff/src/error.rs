//! Diff parsing error types

use thiserror::Error;

/// Errors that can occur while parsing a diff
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// Diff exceeds the configured size limits; checked before any parsing work
    #[error("diff too large: {bytes} bytes / {lines} lines exceeds limit of {max_bytes} bytes / {max_lines} lines")]
    TooLarge {
        /// Byte length of the submitted diff
        bytes: usize,
        /// Line count of the submitted diff
        lines: usize,
        /// Configured byte limit
        max_bytes: usize,
        /// Configured line limit
        max_lines: usize,
    },

    /// Text contains no recognizable file header
    #[error("malformed diff: {0}")]
    Malformed(String),
}

/// Result type for diff parsing operations
pub type Result<T> = std::result::Result<T, DiffError>;
