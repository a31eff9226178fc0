//! GitHub REST client for pull-request operations

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::debug;

use crate::{
    errors::{GitHubError, Result},
    models::PullRequestInfo,
};

/// Configuration values for the GitHub client
#[derive(Debug, Clone, PartialEq)]
pub struct GitHubConfig {
    /// Personal access token; anonymous requests when `None`
    pub token: Option<String>,
    /// API base URL, e.g. `https://api.github.com`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// User-Agent header GitHub requires on every request
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: "https://api.github.com".to_string(),
            timeout: Duration::from_secs(15),
            user_agent: "diffsense/0.1".to_string(),
        }
    }
}

/// Thin wrapper around `reqwest::Client` for GitHub REST operations
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a client from injected configuration
    pub fn new(config: GitHubConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(GitHubError::Config(
                "GitHub base URL is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GitHubError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Fetch pull-request metadata
    pub async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequestInfo> {
        debug!(owner, repo, number, "fetching pull request metadata");

        let response = self
            .request(owner, repo, number)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))
    }

    /// Fetch the raw unified diff of a pull request
    pub async fn get_pull_request_diff(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<String> {
        debug!(owner, repo, number, "fetching pull request diff");

        let response = self
            .request(owner, repo, number)
            .header(header::ACCEPT, "application/vnd.github.v3.diff")
            .send()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))?;

        let response = Self::check_status(response).await?;
        response
            .text()
            .await
            .map_err(|e| GitHubError::Network(e.to_string()))
    }

    fn request(&self, owner: &str, repo: &str, number: u64) -> reqwest::RequestBuilder {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}",
            self.config.base_url.trim_end_matches('/'),
            owner,
            repo,
            number
        );

        let mut builder = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.config.user_agent);
        if let Some(token) = &self.config.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GitHubError::Auth),
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound(
                Self::extract_error_message(response).await,
            )),
            _ => Err(GitHubError::Api {
                status: status.as_u16(),
                message: Self::extract_error_message(response).await,
            }),
        }
    }

    /// Pull the `message` field out of a GitHub error payload when present
    async fn extract_error_message(response: Response) -> String {
        let status = response.status();
        let fallback = format!("GitHub API request failed with status {}", status);

        let Ok(body) = response.text().await else {
            return fallback;
        };
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(payload) => payload
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or(fallback),
            Err(_) => fallback,
        }
    }
}
