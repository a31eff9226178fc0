//! Settings structures and loading

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Top-level service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    /// HTTP server configuration
    pub server: ServerSettings,
    /// Generation backend configuration
    pub llm: LlmSettings,
    /// GitHub API configuration
    pub github: GitHubSettings,
    /// Review pipeline configuration
    pub review: ReviewSettings,
    /// Logging configuration
    pub log: LogSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Generation backend settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmSettings {
    /// Backend base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Overall per-call timeout in seconds
    pub timeout_secs: u64,
    /// Extra attempts after the first failed one
    pub max_retries: u32,
    /// Sampling temperature, backend default when unset
    pub temperature: Option<f32>,
    /// Generation cap in tokens, backend default when unset
    pub max_tokens: Option<u32>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "qwen2.5-coder:3b".to_string(),
            timeout_secs: 60,
            max_retries: 2,
            temperature: None,
            max_tokens: None,
        }
    }
}

/// GitHub API settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GitHubSettings {
    /// Personal access token; anonymous requests when unset
    pub token: Option<String>,
    /// API base URL
    pub api_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent on every request
    pub user_agent: String,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            token: None,
            api_url: "https://api.github.com".to_string(),
            timeout_secs: 15,
            user_agent: "diffsense/0.1".to_string(),
        }
    }
}

/// Review pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReviewSettings {
    /// Maximum concurrent backend calls across the whole review
    pub max_concurrency: usize,
    /// Overall deadline for one review call, in seconds; unset disables it
    pub deadline_secs: Option<u64>,
    /// Largest accepted diff in bytes
    pub max_diff_bytes: usize,
    /// Largest accepted diff in lines
    pub max_diff_lines: usize,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            deadline_secs: Some(120),
            max_diff_bytes: 1_048_576,
            max_diff_lines: 20_000,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSettings {
    /// Default log filter, e.g. `info` or `diffsense=debug`
    pub level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from the default sources
    ///
    /// Precedence, lowest to highest: built-in defaults, an optional
    /// `diffsense.toml` in the working directory, then `DIFFSENSE_`
    /// environment variables (`DIFFSENSE_SERVER__PORT=9000` style).
    pub fn load() -> Result<Self> {
        Self::load_with_file(None)
    }

    /// Load settings, reading the given file instead of `diffsense.toml`
    pub fn load_with_file(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name("diffsense").required(false)),
        };
        builder = builder.add_source(
            config::Environment::with_prefix("DIFFSENSE")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        debug!(
            backend = %settings.llm.base_url,
            model = %settings.llm.model,
            "configuration loaded"
        );
        Ok(settings)
    }

    /// Reject values no component could run with
    pub fn validate(&self) -> Result<()> {
        if self.llm.base_url.is_empty() {
            return Err(ConfigError::Invalid(
                "llm.base_url must not be empty".to_string(),
            ));
        }
        if self.llm.model.is_empty() {
            return Err(ConfigError::Invalid(
                "llm.model must not be empty".to_string(),
            ));
        }
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "llm.timeout_secs must be positive".to_string(),
            ));
        }
        if self.review.max_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "review.max_concurrency must be positive".to_string(),
            ));
        }
        if self.review.max_diff_bytes == 0 || self.review.max_diff_lines == 0 {
            return Err(ConfigError::Invalid(
                "review diff limits must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
