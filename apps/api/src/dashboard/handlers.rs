use axum::{
    extract::{Query, State},
    Json,
};

use crate::dashboard::progress::{compute_progress, ProgressSummary};
use crate::errors::AppError;
use crate::profile::handlers::{require_profile, UserIdQuery};
use crate::projects::store::list_projects;
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProgressSummary>, AppError> {
    let profile = require_profile(&state, params.user_id).await?;
    let projects = list_projects(&state.db, params.user_id).await?;
    Ok(Json(compute_progress(
        &profile,
        &projects,
        state.roadmaps.catalog(),
    )))
}
