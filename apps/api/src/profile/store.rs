use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::UserProfileRow;
use crate::roadmap::generator::SkillAnalysisOutput;

/// Fields a profile update may set. `None` leaves the stored value untouched.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub skills: Option<Vec<String>>,
    pub target_role: Option<String>,
    pub target_sector: Option<String>,
}

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> sqlx::Result<Option<UserProfileRow>> {
    sqlx::query_as::<_, UserProfileRow>("SELECT * FROM user_profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn upsert_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: &ProfileUpdate,
) -> sqlx::Result<UserProfileRow> {
    sqlx::query_as::<_, UserProfileRow>(
        r#"
        INSERT INTO user_profiles (user_id, skills, target_role, target_sector, updated_at)
        VALUES ($1, COALESCE($2, ARRAY[]::TEXT[]), $3, $4, NOW())
        ON CONFLICT (user_id) DO UPDATE
        SET skills = COALESCE($2, user_profiles.skills),
            target_role = COALESCE($3, user_profiles.target_role),
            target_sector = COALESCE($4, user_profiles.target_sector),
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&update.skills)
    .bind(&update.target_role)
    .bind(&update.target_sector)
    .fetch_one(pool)
    .await
}

/// Appends a skill in one statement, creating the profile if needed. The
/// conflict arm locks the row, so concurrent appends never overwrite each other.
/// Yields no row when the skill is already present (case-insensitive).
const ADD_SKILL_SQL: &str = r#"
    INSERT INTO user_profiles (user_id, skills, updated_at)
    VALUES ($1, ARRAY[$2]::TEXT[], NOW())
    ON CONFLICT (user_id) DO UPDATE
    SET skills = array_append(user_profiles.skills, $2),
        updated_at = NOW()
    WHERE NOT EXISTS (
        SELECT 1 FROM unnest(user_profiles.skills) AS s WHERE lower(s) = lower($2)
    )
    RETURNING *
"#;

const REMOVE_SKILL_SQL: &str = r#"
    UPDATE user_profiles
    SET skills = array_remove(skills, $2),
        updated_at = NOW()
    WHERE user_id = $1
    RETURNING *
"#;

/// `None` means the skill already exists.
pub async fn add_skill(
    pool: &PgPool,
    user_id: Uuid,
    skill: &str,
) -> sqlx::Result<Option<UserProfileRow>> {
    sqlx::query_as::<_, UserProfileRow>(ADD_SKILL_SQL)
        .bind(user_id)
        .bind(skill)
        .fetch_optional(pool)
        .await
}

/// Removes exact matches. `None` means the profile does not exist.
pub async fn remove_skill(
    pool: &PgPool,
    user_id: Uuid,
    skill: &str,
) -> sqlx::Result<Option<UserProfileRow>> {
    sqlx::query_as::<_, UserProfileRow>(REMOVE_SKILL_SQL)
        .bind(user_id)
        .bind(skill)
        .fetch_optional(pool)
        .await
}

/// Stores the generated roadmap artifacts on the profile in a single statement.
pub async fn save_roadmap(
    pool: &PgPool,
    user_id: Uuid,
    output: &SkillAnalysisOutput,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        UPDATE user_profiles
        SET categorized_skills = $2,
            skill_gaps = $3,
            roadmap = $4,
            updated_at = NOW()
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .bind(serde_json::to_value(&output.categorized_skills)?)
    .bind(serde_json::to_value(&output.skill_gaps)?)
    .bind(serde_json::to_value(&output.roadmap)?)
    .execute(pool)
    .await?;
    Ok(())
}
