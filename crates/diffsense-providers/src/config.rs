//! Backend client configuration

use std::time::Duration;

/// Configuration for the generation backend client
///
/// Always injected at construction; nothing in this crate reads process-wide
/// state.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Base URL of the backend, e.g. `http://localhost:11434`
    pub base_url: String,
    /// Model identifier to generate with
    pub model: String,
    /// Overall deadline for one `generate` call, retries included
    pub timeout: Duration,
    /// Extra attempts after the first failed one
    pub max_retries: u32,
    /// Sampling temperature, backend default when `None`
    pub temperature: Option<f32>,
    /// Generation cap in tokens, backend default when `None`
    pub max_tokens: Option<u32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "qwen2.5-coder:3b".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
            temperature: None,
            max_tokens: None,
        }
    }
}
