use std::sync::Arc;

use anyhow::Context;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

mod analysis;
mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod services;

use analysis::sentiment::SentimentAnalyzer;
use analysis::suggestions::SuggestionEngine;
use analysis::trends::TrendAnalyzer;
use auth::rate_limit::RateLimitState;
use config::Config;
use db::{postgres::PgStore, EntryStore, UserStore};
use services::claude::ClaudeClient;
use services::journal::JournalService;

#[derive(Clone)]
pub struct AppState {
    pub entries: Arc<dyn EntryStore>,
    pub users: Arc<dyn UserStore>,
    pub journal: Arc<JournalService>,
    pub config: Arc<Config>,
    pub rate_limiter: RateLimitState,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wellness_journal_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env()?);

    let pool = db::pool::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    let store = Arc::new(PgStore::new(pool));

    let mut suggestions = SuggestionEngine::new(TrendAnalyzer::default());
    if config.generation_configured() {
        let client = ClaudeClient::from_config(&config)
            .context("Failed to build suggestion generation client")?;
        suggestions = suggestions.with_generator(Arc::new(client));
        tracing::info!(model = %config.claude_model, "Suggestion generation enabled");
    } else {
        tracing::info!("Suggestion generation disabled, using rule-based suggestions");
    }
    let journal = Arc::new(JournalService::new(SentimentAnalyzer::new(), suggestions));

    let rate_limiter = RateLimitState::new(
        config.auth_rate_limit_max,
        config.auth_rate_limit_window_secs,
    );
    rate_limiter.spawn_purge_worker();

    let state = AppState {
        entries: store.clone(),
        users: store,
        journal,
        config: config.clone(),
        rate_limiter,
    };

    let cors = routes::cors_layer(&config)?;

    let app = routes::build_router(state)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    // Connect info feeds the per-IP auth rate limiter.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
