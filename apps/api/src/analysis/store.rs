use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::insights::CareerInsights;
use crate::analysis::repository::AnalyzedRepo;
use crate::analysis::GitHubAnalysisResult;
use crate::models::project::{ProjectStatus, SOURCE_GITHUB};

/// GitHub section of a user profile, written on every sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubSnapshot {
    pub username: String,
    pub avatar_url: String,
    pub profile_url: String,
    pub public_repo_count: u32,
    pub followers: u32,
    pub following: u32,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub last_synced_at: DateTime<Utc>,
    pub career_insights: CareerInsights,
}

impl GitHubSnapshot {
    pub fn from_result(result: &GitHubAnalysisResult, synced_at: DateTime<Utc>) -> Self {
        let profile = &result.profile;
        Self {
            username: profile.login.clone(),
            avatar_url: profile.avatar_url.clone(),
            profile_url: profile.html_url.clone(),
            public_repo_count: profile.public_repos,
            followers: profile.followers,
            following: profile.following,
            name: profile.name.clone(),
            bio: profile.bio.clone(),
            last_synced_at: synced_at,
            career_insights: result.career_insights.clone(),
        }
    }
}

pub fn project_id(repo: &AnalyzedRepo) -> String {
    format!("github-{}", repo.id)
}

/// Primary skills followed by supporting skills.
pub fn project_skills(repo: &AnalyzedRepo) -> Vec<String> {
    repo.analysis
        .primary_skills
        .iter()
        .chain(&repo.analysis.supporting_skills)
        .cloned()
        .collect()
}

/// Writes a sync result in one transaction: profile snapshot + skills, then
/// replaces every GitHub-sourced project. Nothing is visible unless all of it is.
pub async fn persist_analysis(
    pool: &PgPool,
    user_id: Uuid,
    result: &GitHubAnalysisResult,
    synced_at: DateTime<Utc>,
) -> Result<()> {
    let snapshot = serde_json::to_value(GitHubSnapshot::from_result(result, synced_at))?;
    let skills: Vec<String> = result
        .aggregated_skills
        .iter()
        .map(|s| s.name.clone())
        .collect();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO user_profiles (user_id, skills, github, updated_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (user_id) DO UPDATE
        SET skills = EXCLUDED.skills,
            github = EXCLUDED.github,
            updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(&skills)
    .bind(&snapshot)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM projects WHERE user_id = $1 AND source = $2")
        .bind(user_id)
        .bind(SOURCE_GITHUB)
        .execute(&mut *tx)
        .await?;

    for repo in &result.analyzed_repos {
        sqlx::query(
            r#"
            INSERT INTO projects
                (user_id, id, name, description, url, status, source,
                 skills, stars, pushed_at, analysis)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user_id)
        .bind(project_id(repo))
        .bind(&repo.name)
        .bind(&repo.description)
        .bind(&repo.url)
        .bind(ProjectStatus::Completed.as_str())
        .bind(SOURCE_GITHUB)
        .bind(project_skills(repo))
        .bind(i32::try_from(repo.stars).unwrap_or(i32::MAX))
        .bind(repo.pushed_at)
        .bind(serde_json::to_value(&repo.analysis)?)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        "Persisted GitHub analysis for user {user_id}: {} projects, {} skills",
        result.analyzed_repos.len(),
        skills.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::repository::ProjectAnalysis;
    use crate::analysis::taxonomy::{ExperienceLevel, ProjectType};
    use crate::models::github::ProfileFact;
    use chrono::TimeZone;
    use indexmap::IndexMap;

    fn analyzed_repo() -> AnalyzedRepo {
        AnalyzedRepo {
            id: 991,
            name: "shop".to_string(),
            description: Some("React storefront".to_string()),
            language: Some("TypeScript".to_string()),
            stars: 3,
            url: "https://github.com/octo/shop".to_string(),
            pushed_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            languages: IndexMap::new(),
            analysis: ProjectAnalysis {
                project_type: ProjectType::Frontend,
                primary_skills: vec!["TypeScript".to_string(), "React".to_string()],
                supporting_skills: vec!["CSS".to_string()],
                experience_level: ExperienceLevel::Beginner,
                strengths: vec![],
                improvement_suggestions: vec![],
            },
        }
    }

    #[test]
    fn test_project_id_and_skills() {
        let repo = analyzed_repo();
        assert_eq!(project_id(&repo), "github-991");
        assert_eq!(project_skills(&repo), vec!["TypeScript", "React", "CSS"]);
    }

    #[test]
    fn test_snapshot_copies_profile_and_insights() {
        let result = GitHubAnalysisResult {
            profile: ProfileFact {
                login: "octo".to_string(),
                name: Some("Octo".to_string()),
                bio: None,
                followers: 12,
                following: 4,
                public_repos: 8,
                avatar_url: "https://a".to_string(),
                html_url: "https://github.com/octo".to_string(),
            },
            analyzed_repos: vec![analyzed_repo()],
            aggregated_skills: vec![],
            career_insights: CareerInsights::empty(),
        };
        let synced_at = Utc.with_ymd_and_hms(2025, 2, 2, 0, 0, 0).unwrap();
        let snapshot = GitHubSnapshot::from_result(&result, synced_at);
        assert_eq!(snapshot.username, "octo");
        assert_eq!(snapshot.profile_url, "https://github.com/octo");
        assert_eq!(snapshot.public_repo_count, 8);
        assert_eq!(snapshot.last_synced_at, synced_at);
        assert_eq!(snapshot.career_insights, CareerInsights::empty());
    }
}
