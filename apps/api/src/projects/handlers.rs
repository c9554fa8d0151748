//! Axum route handlers for the Projects API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::project::{ProjectRow, ProjectStatus};
use crate::profile::handlers::UserIdQuery;
use crate::profile::normalize_skills;
use crate::projects::store::{
    create_project, delete_project, list_projects, update_project, NewProject, ProjectUpdate,
};
use crate::projects::{manual_project_id, non_blank, parse_status, validate_name};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub skills: Option<Vec<String>>,
}

fn project_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Project {id} not found"))
}

/// GET /api/v1/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ProjectRow>>, AppError> {
    Ok(Json(list_projects(&state.db, params.user_id).await?))
}

/// POST /api/v1/projects
pub async fn handle_create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectRow>), AppError> {
    let project = NewProject {
        name: validate_name(&req.name)?,
        description: non_blank(req.description),
        url: non_blank(req.url),
        status: match req.status.as_deref() {
            Some(status) => parse_status(status)?,
            None => ProjectStatus::Planned,
        },
        skills: normalize_skills(&req.skills),
    };
    let id = manual_project_id();
    let row = create_project(&state.db, req.user_id, &id, &project).await?;
    info!("Created project {id} for user {}", req.user_id);
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/projects/:id
pub async fn handle_update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectRow>, AppError> {
    let update = ProjectUpdate {
        name: req.name.as_deref().map(validate_name).transpose()?,
        description: req.description.map(|d| d.trim().to_string()),
        status: req.status.as_deref().map(parse_status).transpose()?,
        skills: req.skills.as_deref().map(normalize_skills),
    };
    update_project(&state.db, req.user_id, &id, &update)
        .await?
        .map(Json)
        .ok_or_else(|| project_not_found(&id))
}

/// DELETE /api/v1/projects/:id
pub async fn handle_delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !delete_project(&state.db, params.user_id, &id).await? {
        return Err(project_not_found(&id));
    }
    info!("Deleted project {id} for user {}", params.user_id);
    Ok(StatusCode::NO_CONTENT)
}
