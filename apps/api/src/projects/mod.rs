// User projects: synced GitHub repositories plus manually tracked work.

pub mod handlers;
pub mod store;

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::project::ProjectStatus;

pub fn manual_project_id() -> String {
    format!("manual-{}", Uuid::new_v4())
}

/// Name is required and stored trimmed.
pub fn validate_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Project name is required".to_string()));
    }
    Ok(name.to_string())
}

pub fn parse_status(status: &str) -> Result<ProjectStatus, AppError> {
    status.trim().parse().map_err(AppError::Validation)
}

/// Blank strings count as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
