use sqlx::PgPool;
use uuid::Uuid;

use crate::models::project::{ProjectRow, ProjectStatus, SOURCE_MANUAL};

#[derive(Debug)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status: ProjectStatus,
    pub skills: Vec<String>,
}

/// Fields a project update may change. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub skills: Option<Vec<String>>,
}

/// Newest first.
pub async fn list_projects(pool: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<ProjectRow>> {
    sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT * FROM projects
        WHERE user_id = $1
        ORDER BY created_at DESC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn create_project(
    pool: &PgPool,
    user_id: Uuid,
    id: &str,
    project: &NewProject,
) -> sqlx::Result<ProjectRow> {
    sqlx::query_as::<_, ProjectRow>(
        r#"
        INSERT INTO projects (user_id, id, name, description, url, status, source, skills)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(id)
    .bind(&project.name)
    .bind(&project.description)
    .bind(&project.url)
    .bind(project.status.as_str())
    .bind(SOURCE_MANUAL)
    .bind(&project.skills)
    .fetch_one(pool)
    .await
}

/// Returns `None` when the project does not exist for this user.
pub async fn update_project(
    pool: &PgPool,
    user_id: Uuid,
    id: &str,
    update: &ProjectUpdate,
) -> sqlx::Result<Option<ProjectRow>> {
    sqlx::query_as::<_, ProjectRow>(
        r#"
        UPDATE projects
        SET name = COALESCE($3, name),
            description = COALESCE($4, description),
            status = COALESCE($5, status),
            skills = COALESCE($6, skills),
            updated_at = NOW()
        WHERE user_id = $1 AND id = $2
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(id)
    .bind(&update.name)
    .bind(&update.description)
    .bind(update.status.map(|s| s.as_str()))
    .bind(&update.skills)
    .fetch_optional(pool)
    .await
}

/// Returns whether a row was removed.
pub async fn delete_project(pool: &PgPool, user_id: Uuid, id: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM projects WHERE user_id = $1 AND id = $2")
        .bind(user_id)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
