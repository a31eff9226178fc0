//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use diffsense_agents::Orchestrator;
use diffsense_diff::DiffParser;
use diffsense_github::GitHubClient;

/// State handed to every request handler
///
/// Everything heavyweight sits behind an `Arc`, so cloning per request is
/// cheap. Each review call is independent; no request mutates this state.
#[derive(Clone)]
pub struct AppState {
    /// Diff parser with configured limits
    pub parser: Arc<DiffParser>,
    /// The analyzer orchestrator
    pub orchestrator: Arc<Orchestrator>,
    /// GitHub client, absent when PR fetching is not configured
    pub github: Option<Arc<GitHubClient>>,
    /// Overall deadline applied to every review call
    pub deadline: Option<Duration>,
}

impl AppState {
    /// Assemble application state from its components
    pub fn new(
        parser: DiffParser,
        orchestrator: Orchestrator,
        github: Option<GitHubClient>,
        deadline: Option<Duration>,
    ) -> Self {
        Self {
            parser: Arc::new(parser),
            orchestrator: Arc::new(orchestrator),
            github: github.map(Arc::new),
            deadline,
        }
    }
}
