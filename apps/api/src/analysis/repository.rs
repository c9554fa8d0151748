//! Repository Analyzer: per-repository classification record.

use serde::{Deserialize, Serialize};

use crate::analysis::classifier::TextClassifier;
use crate::analysis::taxonomy::{ExperienceLevel, ProjectType};
use crate::models::github::RepositoryFact;

const MAX_STRENGTHS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    pub project_type: ProjectType,
    /// Declared language first, then skills detected in the description.
    pub primary_skills: Vec<String>,
    /// Other languages and skills detected in name/description, excluding primary.
    pub supporting_skills: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub strengths: Vec<String>,
    pub improvement_suggestions: Vec<String>,
}

/// A repository together with its analysis, as stored and presented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedRepo {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u32,
    pub url: String,
    pub pushed_at: chrono::DateTime<chrono::Utc>,
    pub languages: indexmap::IndexMap<String, u64>,
    pub analysis: ProjectAnalysis,
}

impl AnalyzedRepo {
    pub fn from_fact(repo: &RepositoryFact, analysis: ProjectAnalysis) -> Self {
        Self {
            id: repo.id,
            name: repo.name.clone(),
            description: repo.description.clone(),
            language: repo.language.clone(),
            stars: repo.stars,
            url: repo.url.clone(),
            pushed_at: repo.pushed_at,
            languages: repo.languages.clone(),
            analysis,
        }
    }
}

/// Analyses one repository. Total and side-effect free.
pub fn analyze_repository(classifier: &TextClassifier, repo: &RepositoryFact) -> ProjectAnalysis {
    let description = repo.description_text();

    // Every skill signal: language, byte-map languages, text hits in name + description.
    let mut all_skills: Vec<String> = Vec::new();
    if let Some(language) = &repo.language {
        push_unique(&mut all_skills, language);
    }
    for language in repo.languages.keys() {
        push_unique(&mut all_skills, language);
    }
    for skill in classifier.detect_skills(&format!("{} {}", repo.name, description)) {
        push_unique(&mut all_skills, &skill);
    }

    let mut primary_skills: Vec<String> = Vec::new();
    if let Some(language) = &repo.language {
        push_unique(&mut primary_skills, language);
    }
    for skill in classifier.detect_skills(description) {
        push_unique(&mut primary_skills, &skill);
    }

    let supporting_skills: Vec<String> = all_skills
        .iter()
        .filter(|s| !primary_skills.contains(s))
        .cloned()
        .collect();

    let experience_level = experience_level(repo, all_skills.len());
    let strengths = build_strengths(repo, &primary_skills);
    let improvement_suggestions = build_suggestions(repo);

    ProjectAnalysis {
        project_type: classifier.classify_project_type(repo),
        primary_skills,
        supporting_skills,
        experience_level,
        strengths,
        improvement_suggestions,
    }
}

/// Additive tier score: stars, skill breadth, description quality.
/// ≥4 Advanced, ≥2 Intermediate, otherwise Beginner.
pub fn experience_level(repo: &RepositoryFact, skill_count: usize) -> ExperienceLevel {
    let mut score: i32 = 0;

    if repo.stars > 50 {
        score += 2;
    } else if repo.stars > 10 {
        score += 1;
    }

    if skill_count > 3 {
        score += 2;
    } else if skill_count > 1 {
        score += 1;
    }

    let description_len = repo.description_len();
    if description_len > 100 {
        score += 1;
    }
    if description_len < 20 {
        score -= 1;
    }

    match score {
        s if s >= 4 => ExperienceLevel::Advanced,
        s if s >= 2 => ExperienceLevel::Intermediate,
        _ => ExperienceLevel::Beginner,
    }
}

fn build_strengths(repo: &RepositoryFact, primary_skills: &[String]) -> Vec<String> {
    let mut strengths = Vec::new();

    if let Some(language) = &repo.language {
        strengths.push(format!("Demonstrates proficiency in {language}."));
    }

    let major_skills: Vec<&str> = primary_skills
        .iter()
        .filter(|s| repo.language.as_deref() != Some(s.as_str()))
        .map(String::as_str)
        .collect();
    if !major_skills.is_empty() {
        strengths.push(format!(
            "Applies key technologies like {}.",
            major_skills.join(", ")
        ));
    }

    if repo.stars > 20 {
        strengths.push(format!(
            "Project has gained some community traction with {} stars.",
            repo.stars
        ));
    }

    if repo.description_len() > 50 {
        strengths.push("Includes a clear project description.".to_string());
    }

    strengths.truncate(MAX_STRENGTHS);
    strengths
}

fn build_suggestions(repo: &RepositoryFact) -> Vec<String> {
    let mut suggestions = Vec::new();
    if repo.description_len() < 50 {
        suggestions.push(
            "Consider adding a more detailed description or a README to explain the project's purpose, setup, and usage."
                .to_string(),
        );
    }
    suggestions.push(
        "Add a link to a live demo (if applicable) to showcase the project in action.".to_string(),
    );
    suggestions.push(
        "Incorporate unit or integration tests to ensure code quality and long-term maintainability."
            .to_string(),
    );
    suggestions
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|s| s == item) {
        list.push(item.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use indexmap::IndexMap;

    fn make_repo(
        description: Option<&str>,
        language: Option<&str>,
        stars: u32,
        languages: &[(&str, u64)],
    ) -> RepositoryFact {
        RepositoryFact {
            id: 42,
            name: "my-app".to_string(),
            description: description.map(str::to_string),
            language: language.map(str::to_string),
            stars,
            url: "https://github.com/octo/my-app".to_string(),
            pushed_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            languages: languages
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<IndexMap<_, _>>(),
            fork: false,
        }
    }

    fn description_of_len(prefix: &str, len: usize) -> String {
        let mut s = prefix.to_string();
        while s.chars().count() < len {
            s.push('.');
        }
        s
    }

    #[test]
    fn test_minimal_javascript_repo_is_beginner_frontend() {
        let repo = make_repo(None, Some("JavaScript"), 5, &[("JavaScript", 1000)]);
        let analysis = analyze_repository(&TextClassifier::default(), &repo);

        assert_eq!(analysis.project_type, ProjectType::Frontend);
        assert_eq!(analysis.experience_level, ExperienceLevel::Beginner);
        assert_eq!(analysis.primary_skills, vec!["JavaScript"]);
        assert!(analysis.supporting_skills.is_empty());
        assert_eq!(
            analysis.strengths,
            vec!["Demonstrates proficiency in JavaScript."]
        );
        assert_eq!(analysis.improvement_suggestions.len(), 3);
        assert!(analysis.improvement_suggestions[0].contains("detailed description"));
        assert!(analysis.improvement_suggestions[1].contains("live demo"));
        assert!(analysis.improvement_suggestions[2].contains("tests"));
    }

    #[test]
    fn test_popular_well_described_repo_is_advanced() {
        let description = description_of_len(
            "Storefront built with React and Node.js, shipped with Docker on AWS",
            150,
        );
        let repo = make_repo(Some(&description), None, 100, &[]);
        let analysis = analyze_repository(&TextClassifier::default(), &repo);

        assert_eq!(
            analysis.primary_skills,
            vec!["React", "Node.js", "Docker", "AWS"]
        );
        assert_eq!(analysis.experience_level, ExperienceLevel::Advanced);
    }

    #[test]
    fn test_tier_thresholds() {
        let short = make_repo(Some("tiny"), None, 0, &[]);
        assert_eq!(experience_level(&short, 0), ExperienceLevel::Beginner);

        let medium = make_repo(Some(&description_of_len("x", 30)), None, 11, &[]);
        // 1 (stars) + 1 (two skills)
        assert_eq!(experience_level(&medium, 2), ExperienceLevel::Intermediate);

        let strong = make_repo(Some(&description_of_len("x", 30)), None, 51, &[]);
        // 2 (stars) + 2 (four skills)
        assert_eq!(experience_level(&strong, 4), ExperienceLevel::Advanced);
    }

    #[test]
    fn test_supporting_skills_exclude_primary() {
        let repo = make_repo(
            Some("Dashboard using React"),
            Some("TypeScript"),
            0,
            &[("CSS", 200), ("TypeScript", 5000)],
        );
        let analysis = analyze_repository(&TextClassifier::default(), &repo);
        assert_eq!(analysis.primary_skills, vec!["TypeScript", "React"]);
        assert_eq!(analysis.supporting_skills, vec!["CSS"]);
    }

    #[test]
    fn test_fifty_char_description_earns_no_description_strength() {
        let description = description_of_len("Notes", 50);
        let repo = make_repo(Some(&description), None, 0, &[]);
        let analysis = analyze_repository(&TextClassifier::default(), &repo);
        assert!(analysis.strengths.is_empty());
        // 50 is not below the threshold either, so no description suggestion.
        assert_eq!(analysis.improvement_suggestions.len(), 2);

        let longer = description_of_len("Notes", 51);
        let repo = make_repo(Some(&longer), None, 0, &[]);
        let analysis = analyze_repository(&TextClassifier::default(), &repo);
        assert_eq!(analysis.strengths, vec!["Includes a clear project description."]);
    }

    #[test]
    fn test_supporting_skills_follow_language_map_order() {
        let repo = make_repo(
            None,
            None,
            0,
            &[("TypeScript", 9000), ("SCSS", 800), ("HTML", 120)],
        );
        let analysis = analyze_repository(&TextClassifier::default(), &repo);
        assert!(analysis.primary_skills.is_empty());
        assert_eq!(analysis.supporting_skills, vec!["TypeScript", "SCSS", "HTML"]);
    }

    #[test]
    fn test_strengths_truncated_to_three_in_priority_order() {
        let description = description_of_len("Realtime chat on Express with GraphQL", 80);
        let repo = make_repo(Some(&description), Some("TypeScript"), 30, &[]);
        let analysis = analyze_repository(&TextClassifier::default(), &repo);

        assert_eq!(analysis.strengths.len(), 3);
        assert_eq!(analysis.strengths[0], "Demonstrates proficiency in TypeScript.");
        assert_eq!(
            analysis.strengths[1],
            "Applies key technologies like Express, GraphQL."
        );
        assert!(analysis.strengths[2].contains("30 stars"));
    }

    #[test]
    fn test_long_description_skips_description_suggestion() {
        let description = description_of_len("Well documented utility", 60);
        let repo = make_repo(Some(&description), None, 0, &[]);
        let analysis = analyze_repository(&TextClassifier::default(), &repo);
        assert_eq!(analysis.improvement_suggestions.len(), 2);
        assert!(analysis.improvement_suggestions[0].contains("live demo"));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let repo = make_repo(Some("CLI tool in Rust"), Some("Rust"), 12, &[("Rust", 9000)]);
        let classifier = TextClassifier::default();
        assert_eq!(
            analyze_repository(&classifier, &repo),
            analyze_repository(&classifier, &repo)
        );
    }
}
