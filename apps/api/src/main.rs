mod cache;
mod config;
mod db;
mod errors;
mod models;
mod reference;
mod routes;
mod state;
mod verification;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::verification::stats::StatsCache;
use crate::verification::store::demo_documents;
use crate::verification::{DocumentStore, InMemoryDocumentStore, PgDocumentStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting coaching API v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config).await?;
    info!("Document store initialized ({})", config.store_backend.as_str());

    let stats_cache = Arc::new(StatsCache::new(Duration::from_secs(
        config.stats_cache_ttl_secs,
    )));
    info!("Stats cache TTL: {:?}", stats_cache.ttl());

    // Build app state
    let state = AppState {
        store,
        stats_cache,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // verification is embedded on public pages

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the configured document store. The in-memory store is seeded
/// with the same demo documents the initial migration inserts.
async fn build_store(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres store")?;
            let pool = create_pool(url).await?;
            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
        StoreBackend::Memory => {
            let store = InMemoryDocumentStore::new();
            for doc in demo_documents() {
                store.insert(doc).await?;
            }
            Ok(Arc::new(store))
        }
    }
}
