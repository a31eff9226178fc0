//! Ollama backend implementation
//!
//! Talks to a local Ollama server's `/api/generate` endpoint. Local
//! execution means reviewed code is never sent to an external service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{config::GenerationConfig, error::ProviderError, generator::TextGenerator};

const INITIAL_BACKOFF_MS: u64 = 100;
const MAX_BACKOFF_MS: u64 = 400;

/// Client for a local Ollama generation backend
pub struct OllamaClient {
    client: Client,
    config: GenerationConfig,
}

/// Helper to determine if an error is transient (retryable)
fn is_transient_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.status().is_some_and(|s| s.is_server_error())
}

impl OllamaClient {
    /// Create a new Ollama client from injected configuration
    pub fn new(config: GenerationConfig) -> Result<Self, ProviderError> {
        if config.base_url.is_empty() {
            return Err(ProviderError::Config(
                "backend base URL is required".to_string(),
            ));
        }
        if config.model.is_empty() {
            return Err(ProviderError::Config(
                "backend model identifier is required".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    fn build_request(&self, prompt: &str) -> OllamaGenerateRequest {
        let options = if self.config.temperature.is_some() || self.config.max_tokens.is_some() {
            Some(OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            })
        } else {
            None
        };

        OllamaGenerateRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options,
        }
    }

    /// Execute the request, retrying transient failures with exponential backoff
    async fn request_with_retry(
        &self,
        payload: &OllamaGenerateRequest,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "{}/api/generate",
            self.config.base_url.trim_end_matches('/')
        );
        let mut attempt: u32 = 0;

        loop {
            let last_error = match self.client.post(&url).json(payload).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body: OllamaGenerateResponse = response
                            .json()
                            .await
                            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
                        return Ok(body.response);
                    }

                    let detail = response.text().await.unwrap_or_default();
                    let message = format!("backend returned {}: {}", status, detail);
                    if !status.is_server_error() {
                        return Err(ProviderError::Unavailable(message));
                    }
                    message
                }
                Err(err) => {
                    if !is_transient_error(&err) {
                        return Err(ProviderError::Unavailable(err.to_string()));
                    }
                    err.to_string()
                }
            };

            if attempt >= self.config.max_retries {
                debug!(retries = self.config.max_retries, "retries exhausted");
                return Err(ProviderError::Unavailable(last_error));
            }

            let backoff_ms = (INITIAL_BACKOFF_MS * 2_u64.pow(attempt)).min(MAX_BACKOFF_MS);
            warn!(
                attempt = attempt + 1,
                backoff_ms, error = %last_error,
                "transient backend error, retrying"
            );
            sleep(Duration::from_millis(backoff_ms)).await;
            attempt += 1;
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!(model = %self.config.model, "sending generation request");

        let payload = self.build_request(prompt);
        match tokio::time::timeout(self.config.timeout, self.request_with_retry(&payload)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout = ?self.config.timeout, "generation call timed out");
                Err(ProviderError::Timeout(self.config.timeout))
            }
        }
    }
}

/// Ollama API generate request format
#[derive(Debug, Serialize, Clone)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

/// Optional sampling parameters
#[derive(Debug, Serialize, Clone)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Ollama API generate response format
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    response: String,
}
