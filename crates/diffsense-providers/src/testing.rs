//! Scripted backends for tests
//!
//! Substitutable for [`OllamaClient`](crate::OllamaClient) anywhere a
//! [`TextGenerator`] is accepted, so the pipeline can be exercised with no
//! backend running.

use async_trait::async_trait;

use crate::{error::ProviderError, generator::TextGenerator};

/// Generator that answers from a canned script
///
/// Replies are keyed by substring match against the prompt; the first
/// matching entry wins. Prompts with no matching entry get the default
/// reply, or an empty string when none was set.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGenerator {
    replies: Vec<(String, String)>,
    default_reply: Option<String>,
}

impl ScriptedGenerator {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `reply` whenever the prompt contains `key`
    pub fn with_reply(mut self, key: impl Into<String>, reply: impl Into<String>) -> Self {
        self.replies.push((key.into(), reply.into()));
        self
    }

    /// Reply for prompts no scripted entry matches
    pub fn with_default(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = Some(reply.into());
        self
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        for (key, reply) in &self.replies {
            if prompt.contains(key.as_str()) {
                return Ok(reply.clone());
            }
        }
        Ok(self.default_reply.clone().unwrap_or_default())
    }
}

/// Generator whose every call fails as unavailable
#[derive(Debug, Clone, Default)]
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Unavailable(
            "scripted backend failure".to_string(),
        ))
    }
}

/// Generator that never resolves, for deadline tests
#[derive(Debug, Clone, Default)]
pub struct StallingGenerator;

#[async_trait]
impl TextGenerator for StallingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        std::future::pending::<()>().await;
        unreachable!("pending future never resolves")
    }
}
