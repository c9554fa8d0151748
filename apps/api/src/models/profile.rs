use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One row per user: declared skills, career target, and the latest derived
/// artifacts (GitHub snapshot, roadmap) stored as JSON documents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfileRow {
    pub user_id: Uuid,
    pub skills: Vec<String>,
    pub target_role: Option<String>,
    pub target_sector: Option<String>,
    pub github: Option<Value>,
    pub categorized_skills: Option<Value>,
    pub skill_gaps: Option<Value>,
    pub roadmap: Option<Value>,
    pub updated_at: DateTime<Utc>,
}
