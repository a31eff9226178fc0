//! Error types for analyzer execution

use diffsense_providers::ProviderError;
use thiserror::Error;

/// Errors an analyzer can surface to the orchestrator
///
/// Analyzers never swallow backend failures; isolation is the
/// orchestrator's job.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AgentError {
    /// The backend call behind this analysis failed
    #[error("backend call failed: {0}")]
    Backend(#[from] ProviderError),
}
