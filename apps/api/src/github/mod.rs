//! GitHub client: the data source that supplies profile and repository facts.
//!
//! The analysis engine never talks to GitHub directly; it receives a completed
//! `GitHubData` through the `ProfileSource` trait. Retries and partial-failure
//! handling for the hosting API are contained here.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::github::{GitHubData, ProfileFact, RepositoryFact};

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("careerlens/", env!("CARGO_PKG_VERSION"));
const MAX_RETRIES: u32 = 3;
const REPOS_PER_PAGE: u32 = 100;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub user \"{0}\" not found.")]
    NotFound(String),

    #[error("GitHub API Error: {message}")]
    Api { status: u16, message: String },

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<GitHubError> for AppError {
    fn from(e: GitHubError) -> Self {
        match e {
            GitHubError::NotFound(handle) => {
                AppError::NotFound(format!("GitHub user \"{handle}\" not found."))
            }
            GitHubError::Join(join) => AppError::Internal(anyhow::Error::new(join)),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

/// Anything that can resolve a handle into a completed profile + repository set.
/// Carried in `AppState` as `Arc<dyn ProfileSource>`.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch(&self, handle: &str) -> Result<GitHubData, AppError>;
}

// Wire payloads. Nullable GitHub fields are defaulted in the conversions below.

#[derive(Debug, Deserialize)]
struct UserPayload {
    login: String,
    name: Option<String>,
    bio: Option<String>,
    #[serde(default)]
    followers: u32,
    #[serde(default)]
    following: u32,
    #[serde(default)]
    public_repos: u32,
    #[serde(default)]
    avatar_url: String,
    #[serde(default)]
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct RepoPayload {
    id: i64,
    name: String,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u32,
    html_url: String,
    pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    fork: bool,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl From<UserPayload> for ProfileFact {
    fn from(p: UserPayload) -> Self {
        Self {
            login: p.login,
            name: p.name,
            bio: p.bio,
            followers: p.followers,
            following: p.following,
            public_repos: p.public_repos,
            avatar_url: p.avatar_url,
            html_url: p.html_url,
        }
    }
}

impl RepoPayload {
    fn into_fact(self, languages: IndexMap<String, u64>) -> RepositoryFact {
        RepositoryFact {
            id: self.id,
            name: self.name,
            // An empty description carries no more signal than a missing one.
            description: self.description.filter(|d| !d.is_empty()),
            language: self.language,
            stars: self.stargazers_count,
            url: self.html_url,
            // Never-pushed repositories are treated as maximally stale.
            pushed_at: self.pushed_at.unwrap_or_default(),
            languages,
            fork: self.fork,
        }
    }
}

/// Unauthenticated by default; a token only raises the rate limit.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(base_url: String, token: Option<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// GET `endpoint`, retrying transport errors and 5xx with exponential backoff.
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, GitHubError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut last_error: Option<GitHubError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "GitHub call {} attempt {} failed, retrying after {}ms...",
                    endpoint,
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.get(&url).header("Accept", ACCEPT);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(GitHubError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Err(GitHubError::NotFound(endpoint.to_string()));
            }
            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                last_error = Some(GitHubError::Api {
                    status: status.as_u16(),
                    message: api_message(&body),
                });
                continue;
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(GitHubError::Api {
                    status: status.as_u16(),
                    message: api_message(&body),
                });
            }

            return Ok(response.json::<T>().await?);
        }

        Err(last_error.unwrap_or(GitHubError::Api {
            status: 503,
            message: "Failed to fetch data".to_string(),
        }))
    }

    async fn fetch_languages(&self, handle: &str, repo: &str) -> IndexMap<String, u64> {
        match self
            .get_json::<IndexMap<String, u64>>(&format!("/repos/{handle}/{repo}/languages"))
            .await
        {
            Ok(languages) => languages,
            Err(e) => {
                warn!("Language lookup for {handle}/{repo} failed, using empty map: {e}");
                IndexMap::new()
            }
        }
    }

    pub async fn fetch_github_data(&self, handle: &str) -> Result<GitHubData, GitHubError> {
        let user_endpoint = format!("/users/{handle}");
        let repos_endpoint =
            format!("/users/{handle}/repos?type=owner&sort=pushed&per_page={REPOS_PER_PAGE}");
        let (user, repos) = tokio::try_join!(
            self.get_json::<UserPayload>(&user_endpoint),
            self.get_json::<Vec<RepoPayload>>(&repos_endpoint),
        )
        .map_err(|e| match e {
            GitHubError::NotFound(_) => GitHubError::NotFound(handle.to_string()),
            other => other,
        })?;

        let repos: Vec<RepoPayload> = repos.into_iter().filter(|r| !r.fork).collect();
        debug!("Fetched {} non-fork repositories for {handle}", repos.len());

        // Language lookups run concurrently; results are slotted back by index.
        let mut lookups = JoinSet::new();
        for (index, repo) in repos.iter().enumerate() {
            let client = self.clone();
            let handle = handle.to_string();
            let name = repo.name.clone();
            lookups.spawn(async move { (index, client.fetch_languages(&handle, &name).await) });
        }
        let mut languages: Vec<IndexMap<String, u64>> = vec![IndexMap::new(); repos.len()];
        while let Some(joined) = lookups.join_next().await {
            let (index, map) = joined?;
            languages[index] = map;
        }

        let repos = repos
            .into_iter()
            .zip(languages)
            .map(|(repo, langs)| repo.into_fact(langs))
            .collect();

        info!("GitHub data for {handle} fetched");
        Ok(GitHubData {
            profile: user.into(),
            repos,
        })
    }
}

#[async_trait]
impl ProfileSource for GitHubClient {
    async fn fetch(&self, handle: &str) -> Result<GitHubData, AppError> {
        Ok(self.fetch_github_data(handle).await?)
    }
}

/// Pulls `message` out of a GitHub error body, falling back to a generic text.
fn api_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| "Failed to fetch data".to_string())
}
