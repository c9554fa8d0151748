//! Axum route handlers for the GitHub analysis API.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::store::persist_analysis;
use crate::analysis::GitHubAnalysisResult;
use crate::errors::AppError;
use crate::state::AppState;

const MAX_HANDLE_LEN: usize = 39;

#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    pub user_id: Uuid,
    pub github_username: String,
}

/// GitHub handles: 1–39 ASCII alphanumerics or hyphens.
pub fn validate_handle(handle: &str) -> Result<&str, AppError> {
    let handle = handle.trim();
    if handle.is_empty() {
        return Err(AppError::Validation(
            "github_username cannot be empty".to_string(),
        ));
    }
    if handle.len() > MAX_HANDLE_LEN
        || !handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(AppError::Validation(format!(
            "\"{handle}\" is not a valid GitHub username"
        )));
    }
    Ok(handle)
}

/// POST /api/v1/github/sync
///
/// Fetch → analyze → persist atomically. Returns the full analysis result.
pub async fn handle_sync(
    State(state): State<AppState>,
    Json(request): Json<SyncRequest>,
) -> Result<Json<GitHubAnalysisResult>, AppError> {
    let handle = validate_handle(&request.github_username)?;

    let data = state.source.fetch(handle).await?;
    let now = Utc::now();
    let result = state.analyzer.analyze(&data, now);

    persist_analysis(&state.db, request.user_id, &result, now).await?;
    info!(
        "Synced GitHub profile {handle} for user {} (readiness {})",
        request.user_id, result.career_insights.career_readiness_score
    );

    Ok(Json(result))
}

/// GET /api/v1/github/analyze/:username
///
/// Same pipeline as sync without touching storage.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<GitHubAnalysisResult>, AppError> {
    let handle = validate_handle(&username)?;
    let data = state.source.fetch(handle).await?;
    Ok(Json(state.analyzer.analyze(&data, Utc::now())))
}
