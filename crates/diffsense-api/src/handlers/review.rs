//! Review endpoint

use axum::{extract::State, Json};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    models::{ReviewRequest, ReviewResponse},
    state::AppState,
};

/// Review a pull request by reference or raw diff input
pub async fn review_pull_request(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> ApiResult<Json<ReviewResponse>> {
    if !request.is_valid() {
        return Err(ApiError::BadRequest(
            "provide either a raw diff or repo plus pr_number".to_string(),
        ));
    }

    let diff_text = match &request.diff {
        Some(diff) => diff.clone(),
        None => fetch_pr_diff(&state, &request).await?,
    };

    let parsed = state.parser.parse(&diff_text)?;
    let units = parsed.units();
    info!(
        pr_number = request.pr_number,
        files = parsed.files.len(),
        units = units.len(),
        ignored = parsed.ignored.len(),
        "review requested"
    );

    let outcome = state.orchestrator.review(&units, state.deadline).await;
    Ok(Json(ReviewResponse::from_outcome(
        request.pr_number,
        request.repo.clone(),
        outcome,
        parsed.ignored,
    )))
}

async fn fetch_pr_diff(state: &AppState, request: &ReviewRequest) -> ApiResult<String> {
    // is_valid() guaranteed both fields are present
    let (Some(number), Some(slug)) = (request.pr_number, request.repo.as_deref()) else {
        return Err(ApiError::BadRequest(
            "pr_number and repo are required when no diff is given".to_string(),
        ));
    };
    let (owner, repo) = parse_repo_slug(slug)?;

    let github = state
        .github
        .as_ref()
        .ok_or(ApiError::GitHubNotConfigured)?;
    Ok(github.get_pull_request_diff(owner, repo, number).await?)
}

fn parse_repo_slug(slug: &str) -> ApiResult<(&str, &str)> {
    match slug.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok((owner, repo)),
        _ => Err(ApiError::BadRequest(
            "repository must be in owner/repo format".to_string(),
        )),
    }
}
