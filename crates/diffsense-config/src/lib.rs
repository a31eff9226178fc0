//! Diffsense Configuration
//!
//! Layered settings for the review service: an optional `diffsense.toml`
//! file, overridden by `DIFFSENSE_`-prefixed environment variables,
//! overriding built-in defaults. Loaded once at startup and passed into
//! each component explicitly; nothing reads configuration globally.

pub mod error;
pub mod types;

pub use error::{ConfigError, Result};
pub use types::{
    GitHubSettings, LlmSettings, LogSettings, ReviewSettings, ServerSettings, Settings,
};
