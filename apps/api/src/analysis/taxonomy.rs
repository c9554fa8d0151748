//! Keyword tables: static vocabulary that drives repository classification.
//!
//! Tables are ordered sequences, not hash maps: table order is the tie-break
//! order for project-type classification and the output order of detected
//! skills.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of repository domains. `General` is the fallback when no
/// keyword or language signal fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    Frontend,
    Backend,
    #[serde(rename = "Full Stack")]
    FullStack,
    Mobile,
    #[serde(rename = "Game Dev")]
    GameDev,
    #[serde(rename = "Data/ML")]
    DataMl,
    Systems,
    Tooling,
    General,
}

impl ProjectType {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Frontend => "Frontend",
            ProjectType::Backend => "Backend",
            ProjectType::FullStack => "Full Stack",
            ProjectType::Mobile => "Mobile",
            ProjectType::GameDev => "Game Dev",
            ProjectType::DataMl => "Data/ML",
            ProjectType::Systems => "Systems",
            ProjectType::Tooling => "Tooling",
            ProjectType::General => "General",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordinal tier shared by repositories, aggregated skills and whole profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Immutable keyword configuration injected into the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTables {
    /// Candidate project types with their indicator phrases, in tie-break order.
    pub project_types: Vec<(ProjectType, Vec<&'static str>)>,
    /// Canonical skill name → phrases that indicate it in free text.
    pub skills: Vec<(&'static str, Vec<&'static str>)>,
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            project_types: vec![
                (
                    ProjectType::Frontend,
                    vec![
                        "frontend",
                        "ui",
                        "user interface",
                        "website",
                        "design system",
                        "css",
                        "html",
                        "react",
                        "vue",
                        "angular",
                        "svelte",
                        "next.js",
                        "gatsby",
                    ],
                ),
                (
                    ProjectType::Backend,
                    vec![
                        "backend",
                        "api",
                        "server",
                        "database",
                        "microservice",
                        "django",
                        "flask",
                        "express",
                        "spring",
                        "ruby on rails",
                    ],
                ),
                (ProjectType::FullStack, vec!["full stack", "full-stack"]),
                (
                    ProjectType::Mobile,
                    vec![
                        "mobile",
                        "android",
                        "ios",
                        "swift",
                        "kotlin",
                        "react native",
                        "flutter",
                        "xamarin",
                    ],
                ),
                (
                    ProjectType::GameDev,
                    vec!["game", "gamedev", "unity", "unreal", "game engine", "bevy", "godot"],
                ),
                (
                    ProjectType::DataMl,
                    vec![
                        "data science",
                        "machine learning",
                        "ai",
                        "neural network",
                        "analysis",
                        "visualization",
                        "ml",
                        "deep learning",
                        "pandas",
                        "numpy",
                        "scikit-learn",
                        "tensorflow",
                        "pytorch",
                    ],
                ),
                (
                    ProjectType::Systems,
                    vec!["os", "kernel", "compiler", "embedded", "systems", "network", "blockchain"],
                ),
                (
                    ProjectType::Tooling,
                    vec!["cli", "tool", "library", "framework", "plugin", "devtool"],
                ),
            ],
            skills: vec![
                ("React", vec!["react", "reactjs"]),
                ("Next.js", vec!["nextjs", "next.js"]),
                ("Vue.js", vec!["vue", "vuejs"]),
                ("Angular", vec!["angular"]),
                ("Svelte", vec!["svelte"]),
                ("Node.js", vec!["node.js", "nodejs"]),
                ("Express", vec!["express", "express.js"]),
                ("Django", vec!["django"]),
                ("Flask", vec!["flask"]),
                ("Spring Boot", vec!["spring boot"]),
                ("Docker", vec!["docker"]),
                ("Kubernetes", vec!["kubernetes", "k8s"]),
                ("AWS", vec!["aws", "amazon web services"]),
                ("Azure", vec!["azure"]),
                ("Google Cloud", vec!["gcp", "google cloud"]),
                ("SQL", vec!["sql"]),
                ("NoSQL", vec!["nosql", "mongodb", "firestore", "dynamodb"]),
                ("GraphQL", vec!["graphql"]),
                ("Jest", vec!["jest"]),
                ("Testing Library", vec!["testing library", "rtl"]),
                ("Webpack", vec!["webpack"]),
                ("Vite", vec!["vite"]),
            ],
        }
    }
}

/// Language-tag fragments that award a bonus point to a project type.
/// Matched as substrings of the lower-cased primary language.
pub const FRONTEND_LANGUAGES: &[&str] = &["javascript", "typescript", "html", "css"];
pub const BACKEND_LANGUAGES: &[&str] = &["python", "java", "go", "ruby", "php", "c#"];
pub const NOTEBOOK_LANGUAGES: &[&str] = &["jupyter"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_type_serializes_as_label() {
        let json = serde_json::to_string(&ProjectType::DataMl).unwrap();
        assert_eq!(json, r#""Data/ML""#);
        let parsed: ProjectType = serde_json::from_str(r#""Full Stack""#).unwrap();
        assert_eq!(parsed, ProjectType::FullStack);
    }

    #[test]
    fn test_default_tables_keep_declared_order() {
        let tables = KeywordTables::default();
        assert_eq!(tables.project_types[0].0, ProjectType::Frontend);
        assert_eq!(tables.project_types[1].0, ProjectType::Backend);
        assert_eq!(tables.skills.first().map(|(s, _)| *s), Some("React"));
        assert_eq!(tables.skills.last().map(|(s, _)| *s), Some("Vite"));
    }

    #[test]
    fn test_general_is_not_a_candidate() {
        let tables = KeywordTables::default();
        assert!(tables
            .project_types
            .iter()
            .all(|(t, _)| *t != ProjectType::General));
    }

    #[test]
    fn test_experience_levels_are_ordered() {
        assert!(ExperienceLevel::Beginner < ExperienceLevel::Intermediate);
        assert!(ExperienceLevel::Intermediate < ExperienceLevel::Advanced);
    }
}
