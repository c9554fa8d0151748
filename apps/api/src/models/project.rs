use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

pub const SOURCE_GITHUB: &str = "github";
pub const SOURCE_MANUAL: &str = "manual";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub user_id: Uuid,
    /// `github-{repo id}` for synced repositories, `manual-{uuid}` otherwise.
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status: String,
    pub source: String,
    pub skills: Vec<String>,
    pub stars: Option<i32>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub analysis: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRow {
    /// Unknown status strings count as `Planned`.
    pub fn status(&self) -> ProjectStatus {
        self.status.parse().unwrap_or(ProjectStatus::Planned)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planned => "Planned",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Planned" => Ok(ProjectStatus::Planned),
            "In Progress" => Ok(ProjectStatus::InProgress),
            "Completed" => Ok(ProjectStatus::Completed),
            other => Err(format!(
                "Unknown project status '{other}' (expected Planned, In Progress or Completed)"
            )),
        }
    }
}
