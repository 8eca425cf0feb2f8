use std::sync::Arc;

use crate::config::Config;
use crate::verification::stats::StatsCache;
use crate::verification::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable document store. Default: postgres. Swap via DOCUMENT_STORE env.
    pub store: Arc<dyn DocumentStore>,
    /// Cached per-type document counts; invalidated on issuance.
    pub stats_cache: Arc<StatsCache>,
    pub config: Config,
}
