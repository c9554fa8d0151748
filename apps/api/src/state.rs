use std::sync::Arc;

use sqlx::PgPool;

use crate::analysis::ProfileAnalyzer;
use crate::github::ProfileSource;
use crate::roadmap::generator::RoadmapGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable profile source. Default: GitHubClient against GITHUB_API_URL.
    pub source: Arc<dyn ProfileSource>,
    pub analyzer: Arc<ProfileAnalyzer>,
    pub roadmaps: Arc<RoadmapGenerator>,
}
