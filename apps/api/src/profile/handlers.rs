//! Axum route handlers for the Profile API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::UserProfileRow;
use crate::profile::store::{add_skill, get_profile, remove_skill, upsert_profile, ProfileUpdate};
use crate::profile::{duplicate_skill, normalize_skills, validate_skill};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub user_id: Uuid,
    pub skills: Option<Vec<String>>,
    pub target_role: Option<String>,
    pub target_sector: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    pub user_id: Uuid,
    pub skill: String,
}

/// Loads a profile or fails with `NotFound`.
pub async fn require_profile(state: &AppState, user_id: Uuid) -> Result<UserProfileRow, AppError> {
    get_profile(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User profile not found.".to_string()))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<UserProfileRow>, AppError> {
    Ok(Json(require_profile(&state, params.user_id).await?))
}

/// PUT /api/v1/profile
///
/// Onboarding and profile edits. Omitted fields keep their stored value.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfileRow>, AppError> {
    let update = ProfileUpdate {
        skills: req.skills.as_deref().map(normalize_skills),
        target_role: req.target_role.map(|r| r.trim().to_string()),
        target_sector: req.target_sector.map(|s| s.trim().to_string()),
    };
    Ok(Json(upsert_profile(&state.db, req.user_id, &update).await?))
}

/// POST /api/v1/profile/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(req): Json<SkillRequest>,
) -> Result<Json<UserProfileRow>, AppError> {
    let skill = validate_skill(&req.skill)?;
    add_skill(&state.db, req.user_id, skill)
        .await?
        .map(Json)
        .ok_or_else(|| duplicate_skill(skill))
}

/// DELETE /api/v1/profile/skills
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Json(req): Json<SkillRequest>,
) -> Result<Json<UserProfileRow>, AppError> {
    remove_skill(&state.db, req.user_id, &req.skill)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User profile not found.".to_string()))
}
