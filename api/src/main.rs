//! Judgeboard API Server
//!
//! Aggregates competitive-programming stats from LeetCode, Codeforces and
//! HackerRank into unified profiles, ranks them on a leaderboard and lists
//! upcoming contests. Uses hexagonal (ports & adapters) architecture.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::PostgresProfileRepository;
use app::{ContestService, LeaderboardService, PlatformRegistry, StatsService};
use config::Config;
use domain::ports::ProfileRepository;

/// Application state shared across all handlers
pub struct AppState<R: ProfileRepository> {
    pub stats_service: Arc<StatsService<R>>,
    pub leaderboard_service: Arc<LeaderboardService<R>>,
    pub contest_service: Arc<ContestService>,
}

// Manual impl: derive would require `R: Clone`
impl<R: ProfileRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            stats_service: self.stats_service.clone(),
            leaderboard_service: self.leaderboard_service.clone(),
            contest_service: self.contest_service.clone(),
        }
    }
}

/// Per-IP limit for routes that fan out to third-party judge APIs
#[derive(Debug, Clone, Copy)]
pub struct SyncRateLimit {
    pub per_second: u64,
    pub burst: u32,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn build_router<R: ProfileRepository + 'static>(
    state: AppState<R>,
    sync_limit: Option<SyncRateLimit>,
) -> Router {
    // Rate-limited routes (anything that calls the judges)
    let mut rate_limited_routes = Router::new()
        .route("/profiles/:id/sync", post(handlers::sync_stats::<R>))
        .route(
            "/platforms/:platform/users/:username",
            get(handlers::preview_platform_stats::<R>),
        );

    if let Some(limit) = sync_limit {
        // Uses PeerIpKeyExtractor to get client IP from socket connection
        // (SmartIpKeyExtractor requires X-Forwarded-For headers from reverse proxy)
        match GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(limit.per_second)
            .burst_size(limit.burst)
            .finish()
        {
            Some(config) => {
                rate_limited_routes = rate_limited_routes.layer(GovernorLayer {
                    config: Arc::new(config),
                });
            }
            None => tracing::warn!(?limit, "Invalid rate limit, serving judge routes unthrottled"),
        }
    }

    Router::new()
        .route("/health", get(health))
        .route("/profiles", post(handlers::create_profile::<R>))
        .route("/profiles/:id", get(handlers::get_profile::<R>))
        .route("/users/:username", get(handlers::get_profile_by_username::<R>))
        .route(
            "/profiles/:id/platforms/:platform",
            put(handlers::set_platform_username::<R>)
                .delete(handlers::remove_platform_username::<R>),
        )
        .route("/leaderboard", get(handlers::get_leaderboard::<R>))
        .route("/tournaments", get(handlers::list_tournaments::<R>))
        .merge(rate_limited_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,judgeboard_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Judgeboard API...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // One client for every judge and contest upstream
    let http = reqwest::Client::builder()
        .user_agent(concat!("judgeboard-api/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    // Create adapters
    let profile_repo = Arc::new(PostgresProfileRepository::new(db));
    let registry = Arc::new(PlatformRegistry::with_defaults(http.clone(), &config));

    // Create application services
    let state = AppState {
        stats_service: Arc::new(StatsService::new(profile_repo.clone(), registry)),
        leaderboard_service: Arc::new(LeaderboardService::new(profile_repo)),
        contest_service: Arc::new(ContestService::from_config(http, &config)),
    };

    let app = build_router(
        state,
        Some(SyncRateLimit {
            per_second: config.sync_rate_per_second,
            burst: config.sync_rate_burst,
        }),
    );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
