//! Text Classifier: substring keyword matching over repository text.
//!
//! Matching is plain `contains` on lower-cased text with no word boundaries,
//! so "java" also fires inside "javascript" and "ai" inside "email". Score
//! thresholds downstream are calibrated against this behaviour.

use tracing::debug;

use crate::analysis::taxonomy::{
    KeywordTables, ProjectType, BACKEND_LANGUAGES, FRONTEND_LANGUAGES, NOTEBOOK_LANGUAGES,
};
use crate::models::github::RepositoryFact;

const KEYWORD_POINTS: u32 = 2;
const FRONTEND_LANGUAGE_POINTS: u32 = 1;
const BACKEND_LANGUAGE_POINTS: u32 = 1;
const NOTEBOOK_LANGUAGE_POINTS: u32 = 2;

#[derive(Debug, Clone, Default)]
pub struct TextClassifier {
    tables: KeywordTables,
}

impl TextClassifier {
    pub fn new(tables: KeywordTables) -> Self {
        Self { tables }
    }

    /// Returns canonical skill names mentioned in `text`, in table order.
    pub fn detect_skills(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let lower = text.to_lowercase();
        self.tables
            .skills
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
            .map(|(skill, _)| skill.to_string())
            .collect()
    }

    /// Picks the project type with the strictly highest score; the earliest
    /// entry in table order wins a tie. Returns `General` when nothing scores.
    pub fn classify_project_type(&self, repo: &RepositoryFact) -> ProjectType {
        let search_text = format!(
            "{} {}",
            repo.name.to_lowercase(),
            repo.description_text().to_lowercase()
        );
        let language = repo
            .language
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        let mut scores: Vec<(ProjectType, u32)> = self
            .tables
            .project_types
            .iter()
            .map(|(project_type, keywords)| {
                let hit = keywords.iter().any(|kw| search_text.contains(kw));
                (*project_type, if hit { KEYWORD_POINTS } else { 0 })
            })
            .collect();

        if matches_any(&language, FRONTEND_LANGUAGES) {
            add_points(&mut scores, ProjectType::Frontend, FRONTEND_LANGUAGE_POINTS);
        }
        if matches_any(&language, BACKEND_LANGUAGES) {
            add_points(&mut scores, ProjectType::Backend, BACKEND_LANGUAGE_POINTS);
        }
        if matches_any(&language, NOTEBOOK_LANGUAGES) {
            add_points(&mut scores, ProjectType::DataMl, NOTEBOOK_LANGUAGE_POINTS);
        }

        let mut best = (ProjectType::General, 0);
        for (project_type, score) in scores {
            if score > best.1 {
                best = (project_type, score);
            }
        }

        debug!(repo = %repo.name, project_type = %best.0, score = best.1, "classified repository");
        best.0
    }
}

fn matches_any(language: &str, fragments: &[&str]) -> bool {
    !language.is_empty() && fragments.iter().any(|f| language.contains(f))
}

fn add_points(scores: &mut Vec<(ProjectType, u32)>, target: ProjectType, points: u32) {
    match scores.iter_mut().find(|(t, _)| *t == target) {
        Some((_, score)) => *score += points,
        None => scores.push((target, points)),
    }
}
