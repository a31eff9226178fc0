//! Service binary: configuration, logging, wiring, serve

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use diffsense_agents::{default_analyzers, Orchestrator, OrchestratorConfig, TieBreak};
use diffsense_api::{ApiServer, AppState};
use diffsense_config::{LogSettings, Settings};
use diffsense_diff::{DiffLimits, DiffParser};
use diffsense_github::{GitHubClient, GitHubConfig};
use diffsense_providers::{GenerationConfig, OllamaClient, TextGenerator};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let settings = Settings::load().context("loading configuration")?;
    init_tracing(&settings.log);

    let state = build_state(&settings).context("wiring service components")?;
    ApiServer::new(state, settings.server.host.clone(), settings.server.port)
        .run()
        .await
        .context("running HTTP server")
}

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_state(settings: &Settings) -> anyhow::Result<AppState> {
    let generation = GenerationConfig {
        base_url: settings.llm.base_url.clone(),
        model: settings.llm.model.clone(),
        timeout: Duration::from_secs(settings.llm.timeout_secs),
        max_retries: settings.llm.max_retries,
        temperature: settings.llm.temperature,
        max_tokens: settings.llm.max_tokens,
    };
    let generator: Arc<dyn TextGenerator> =
        Arc::new(OllamaClient::new(generation).context("building backend client")?);

    let orchestrator = Orchestrator::new(
        default_analyzers(generator),
        OrchestratorConfig {
            max_concurrency: settings.review.max_concurrency,
            tie_break: TieBreak::DispatchOrder,
        },
    );

    let parser = DiffParser::new(DiffLimits {
        max_bytes: settings.review.max_diff_bytes,
        max_lines: settings.review.max_diff_lines,
    });

    let github = GitHubClient::new(GitHubConfig {
        token: settings.github.token.clone(),
        base_url: settings.github.api_url.clone(),
        timeout: Duration::from_secs(settings.github.timeout_secs),
        user_agent: settings.github.user_agent.clone(),
    })
    .context("building GitHub client")?;

    let deadline = settings.review.deadline_secs.map(Duration::from_secs);
    Ok(AppState::new(parser, orchestrator, Some(github), deadline))
}
