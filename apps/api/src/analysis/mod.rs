// GitHub profile analysis: rule-based inference over repository metadata.
// Pure and synchronous; fetching lives in `github`, persistence in `store`.

pub mod aggregation;
pub mod classifier;
pub mod handlers;
pub mod insights;
pub mod repository;
pub mod store;
pub mod taxonomy;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::aggregation::{aggregate_skills, AggregatedSkill};
use crate::analysis::classifier::TextClassifier;
use crate::analysis::insights::{synthesize_insights, CareerInsights};
use crate::analysis::repository::{analyze_repository, AnalyzedRepo};
use crate::analysis::taxonomy::KeywordTables;
use crate::models::github::{GitHubData, ProfileFact, RepositoryFact};

/// Combined output of one sync: the contract consumed by storage and clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubAnalysisResult {
    pub profile: ProfileFact,
    pub analyzed_repos: Vec<AnalyzedRepo>,
    pub aggregated_skills: Vec<AggregatedSkill>,
    pub career_insights: CareerInsights,
}

/// Runs the full pipeline: per-repo analysis → skill aggregation → insights.
#[derive(Debug, Clone, Default)]
pub struct ProfileAnalyzer {
    classifier: TextClassifier,
}

impl ProfileAnalyzer {
    pub fn new(tables: KeywordTables) -> Self {
        Self {
            classifier: TextClassifier::new(tables),
        }
    }

    /// Forks are dropped here even if the source already filtered them.
    pub fn analyze(&self, data: &GitHubData, now: DateTime<Utc>) -> GitHubAnalysisResult {
        let repos: Vec<RepositoryFact> = data.repos.iter().filter(|r| !r.fork).cloned().collect();

        let analyzed_repos: Vec<AnalyzedRepo> = repos
            .iter()
            .map(|repo| AnalyzedRepo::from_fact(repo, analyze_repository(&self.classifier, repo)))
            .collect();

        let aggregated_skills = aggregate_skills(&repos, now);
        debug!(
            repos = analyzed_repos.len(),
            skills = aggregated_skills.len(),
            "aggregated skill inventory"
        );

        let career_insights =
            synthesize_insights(&data.profile, &analyzed_repos, &aggregated_skills, now);

        GitHubAnalysisResult {
            profile: data.profile.clone(),
            analyzed_repos,
            aggregated_skills,
            career_insights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::taxonomy::{ExperienceLevel, ProjectType};
    use chrono::{Duration, TimeZone};
    use indexmap::IndexMap;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn profile() -> ProfileFact {
        ProfileFact {
            login: "octo".to_string(),
            name: None,
            bio: None,
            followers: 3,
            following: 1,
            public_repos: 3,
            avatar_url: "https://avatars.example/octo".to_string(),
            html_url: "https://github.com/octo".to_string(),
        }
    }

    fn repo(id: i64, name: &str, description: Option<&str>, language: &str, fork: bool) -> RepositoryFact {
        RepositoryFact {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            language: Some(language.to_string()),
            stars: 2,
            url: format!("https://github.com/octo/{name}"),
            pushed_at: now() - Duration::days(30),
            languages: IndexMap::from([(language.to_string(), 12_000)]),
            fork,
        }
    }

    fn sample() -> GitHubData {
        GitHubData {
            profile: profile(),
            repos: vec![
                repo(1, "portfolio", Some("Personal website built with React"), "JavaScript", false),
                repo(2, "upstream-copy", Some("Forked kernel"), "C", true),
                repo(3, "orders-api", Some("REST api for orders"), "Python", false),
            ],
        }
    }

    #[test]
    fn test_forks_never_analyzed() {
        let result = ProfileAnalyzer::default().analyze(&sample(), now());
        assert_eq!(result.analyzed_repos.len(), 2);
        assert!(result.analyzed_repos.iter().all(|r| r.id != 2));
        assert!(result.aggregated_skills.iter().all(|s| s.name != "C"));
    }

    #[test]
    fn test_pipeline_produces_full_stack_profile() {
        let result = ProfileAnalyzer::default().analyze(&sample(), now());
        assert_eq!(
            result.analyzed_repos[0].analysis.project_type,
            ProjectType::Frontend
        );
        assert_eq!(
            result.analyzed_repos[1].analysis.project_type,
            ProjectType::Backend
        );
        assert_eq!(result.career_insights.primary_role, "Full Stack");
        assert!(result
            .aggregated_skills
            .iter()
            .all(|s| s.level == ExperienceLevel::Advanced));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let analyzer = ProfileAnalyzer::default();
        let data = sample();
        assert_eq!(analyzer.analyze(&data, now()), analyzer.analyze(&data, now()));
    }

    #[test]
    fn test_result_serializes_with_snake_case_fields() {
        let result = ProfileAnalyzer::default().analyze(&sample(), now());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("analyzed_repos").is_some());
        assert!(json["career_insights"]["career_readiness_score"].is_u64());
        assert_eq!(json["analyzed_repos"][0]["analysis"]["project_type"], "Frontend");
    }
}
