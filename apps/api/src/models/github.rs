use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A public repository as supplied by the data source.
/// Nullable wire fields are normalised at the boundary (see `github`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryFact {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u32,
    pub url: String,
    pub pushed_at: DateTime<Utc>,
    /// Language name → bytes of code, in upstream order (largest first).
    #[serde(default)]
    pub languages: IndexMap<String, u64>,
    #[serde(default)]
    pub fork: bool,
}

impl RepositoryFact {
    /// Description with the null-as-empty rule applied.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Description length in characters; 0 when absent.
    pub fn description_len(&self) -> usize {
        self.description_text().chars().count()
    }
}

/// Public profile of the account owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileFact {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
    pub avatar_url: String,
    pub html_url: String,
}

/// Completed fetch handed to the engine: profile plus non-fork repositories
/// with their language maps populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubData {
    pub profile: ProfileFact,
    pub repos: Vec<RepositoryFact>,
}
