mod analysis;
mod config;
mod dashboard;
mod db;
mod errors;
mod github;
mod models;
mod profile;
mod projects;
mod roadmap;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::taxonomy::KeywordTables;
use crate::analysis::ProfileAnalyzer;
use crate::config::Config;
use crate::db::create_pool;
use crate::github::GitHubClient;
use crate::roadmap::generator::RoadmapGenerator;
use crate::roadmap::skill_data::RoleCatalog;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerLens API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize GitHub client
    let github = GitHubClient::new(config.github_api_url.clone(), config.github_token.clone())?;
    info!(
        "GitHub client initialized ({}, {})",
        config.github_api_url,
        if config.github_token.is_some() {
            "authenticated"
        } else {
            "anonymous"
        }
    );

    // Analysis engine and role catalog are built once and shared read-only
    let tables = KeywordTables::default();
    let catalog = RoleCatalog::default();
    info!(
        "Loaded {} project types, {} skill keywords, {} roadmap roles",
        tables.project_types.len(),
        tables.skills.len(),
        catalog.roles.len()
    );

    let state = AppState {
        db,
        source: Arc::new(github),
        analyzer: Arc::new(ProfileAnalyzer::new(tables)),
        roadmaps: Arc::new(RoadmapGenerator::new(catalog)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins to the web app domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
