//! Issued-document counts per type, cached for the admin dashboard.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::cache::TtlCache;
use crate::errors::AppError;
use crate::reference::DocumentType;
use crate::verification::store::DocumentStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub slug: &'static str,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub total: i64,
    pub by_type: Vec<TypeCount>,
    pub computed_at: DateTime<Utc>,
}

pub type StatsCache = TtlCache<DocumentStats>;

/// Returns cached stats when fresh, otherwise counts every table and caches.
pub async fn document_stats(
    store: &dyn DocumentStore,
    cache: &StatsCache,
) -> Result<DocumentStats, AppError> {
    if let Some(stats) = cache.get() {
        debug!("Serving document stats from cache");
        return Ok(stats);
    }

    let mut by_type = Vec::with_capacity(DocumentType::ALL.len());
    for doc_type in DocumentType::ALL {
        by_type.push(TypeCount {
            doc_type,
            slug: doc_type.slug(),
            count: store.count(doc_type).await?,
        });
    }

    let stats = DocumentStats {
        total: by_type.iter().map(|c| c.count).sum(),
        by_type,
        computed_at: Utc::now(),
    };
    cache.set(stats.clone());
    Ok(stats)
}
