//! Axum route handlers for the Roadmap API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::profile::handlers::require_profile;
use crate::profile::store::save_roadmap;
use crate::roadmap::generator::SkillAnalysisOutput;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRoadmapRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRoadmapRequest {
    pub target_role: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// POST /api/v1/roadmap/generate
///
/// Builds the roadmap from the stored profile and saves it back onto the profile.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRoadmapRequest>,
) -> Result<Json<SkillAnalysisOutput>, AppError> {
    let profile = require_profile(&state, req.user_id).await?;
    let target_role = profile
        .target_role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| {
            AppError::Validation(
                "Please set your target role in your profile before generating a roadmap."
                    .to_string(),
            )
        })?;

    let output = state.roadmaps.generate(target_role, &profile.skills)?;
    save_roadmap(&state.db, req.user_id, &output).await?;

    info!(
        "Generated {target_role} roadmap for user {}: {} missing skills",
        req.user_id,
        output.skill_gaps.missing.len()
    );
    Ok(Json(output))
}

/// POST /api/v1/roadmap/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(req): Json<PreviewRoadmapRequest>,
) -> Result<Json<SkillAnalysisOutput>, AppError> {
    Ok(Json(state.roadmaps.generate(req.target_role.trim(), &req.skills)?))
}
