//! The generation seam analyzers depend on

use async_trait::async_trait;

use crate::error::ProviderError;

/// Core trait every generation backend must implement
///
/// One capability: prompt in, raw text out. Implementations own their own
/// retry and timeout policy; callers only see the final result.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a prompt to the backend and return its raw reply
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
