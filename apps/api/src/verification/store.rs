//! Storage for reference-carrying documents, one table per document type.
//!
//! `AppState` holds an `Arc<dyn DocumentStore>`, chosen at startup via
//! `DOCUMENT_STORE` (`postgres` by default, `memory` for local runs).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{NewDocument, StoredDocument, STATUS_ACTIVE};
use crate::reference::registry::document_info;
use crate::reference::DocumentType;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Exact-match lookup of `reference` in the table owning `doc_type`.
    async fn find_by_reference(
        &self,
        doc_type: DocumentType,
        reference: &str,
    ) -> Result<Option<StoredDocument>, AppError>;

    /// Persists a new document. A duplicate reference is `AppError::Conflict`.
    async fn insert(&self, doc: NewDocument) -> Result<StoredDocument, AppError>;

    async fn count(&self, doc_type: DocumentType) -> Result<i64, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PgDocumentStore
// ────────────────────────────────────────────────────────────────────────────

/// Postgres-backed store. Table and column names come from the registry
/// binding only; user input is always a bind parameter.
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn select_columns(field: &str) -> String {
    format!("id, {field} AS reference_id, user_name, title, status, score, details, issued_at")
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_by_reference(
        &self,
        doc_type: DocumentType,
        reference: &str,
    ) -> Result<Option<StoredDocument>, AppError> {
        let info = document_info(doc_type);
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = $1 LIMIT 1",
            select_columns(info.field_name),
            info.model_name,
            info.field_name
        );
        let row = sqlx::query_as::<_, StoredDocument>(&sql)
            .bind(reference)
            .fetch_optional(&self.pool)
            .await?;
        debug!(
            "Probed {} for {reference}: {}",
            info.model_name,
            if row.is_some() { "hit" } else { "miss" }
        );
        Ok(row)
    }

    async fn insert(&self, doc: NewDocument) -> Result<StoredDocument, AppError> {
        let info = document_info(doc.doc_type);
        let sql = format!(
            r#"
            INSERT INTO {} (id, {}, user_name, title, status, score, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            info.model_name,
            info.field_name,
            select_columns(info.field_name)
        );
        sqlx::query_as::<_, StoredDocument>(&sql)
            .bind(Uuid::new_v4())
            .bind(&doc.reference_id)
            .bind(&doc.user_name)
            .bind(&doc.title)
            .bind(&doc.status)
            .bind(doc.score)
            .bind(&doc.details)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict(
                    format!("Reference ID {} already exists", doc.reference_id),
                ),
                other => AppError::Database(other),
            })
    }

    async fn count(&self, doc_type: DocumentType) -> Result<i64, AppError> {
        let info = document_info(doc_type);
        let sql = format!("SELECT COUNT(*) FROM {}", info.model_name);
        Ok(sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// InMemoryDocumentStore
// ────────────────────────────────────────────────────────────────────────────

/// Process-local store for local runs and tests. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    tables: RwLock<HashMap<DocumentType, Vec<StoredDocument>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_by_reference(
        &self,
        doc_type: DocumentType,
        reference: &str,
    ) -> Result<Option<StoredDocument>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(&doc_type)
            .and_then(|rows| rows.iter().find(|d| d.reference_id == reference))
            .cloned())
    }

    async fn insert(&self, doc: NewDocument) -> Result<StoredDocument, AppError> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(doc.doc_type).or_default();
        if rows.iter().any(|d| d.reference_id == doc.reference_id) {
            return Err(AppError::Conflict(format!(
                "Reference ID {} already exists",
                doc.reference_id
            )));
        }
        let stored = StoredDocument {
            id: Uuid::new_v4(),
            reference_id: doc.reference_id,
            user_name: doc.user_name,
            title: doc.title,
            status: doc.status,
            score: doc.score,
            details: doc.details,
            issued_at: Utc::now(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn count(&self, doc_type: DocumentType) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.get(&doc_type).map_or(0, |rows| rows.len() as i64))
    }
}

/// Demo documents shown on the public site. Mirrors the rows seeded by
/// `migrations/0001_documents.sql` so both backends verify the same IDs.
pub fn demo_documents() -> Vec<NewDocument> {
    vec![
        NewDocument {
            doc_type: DocumentType::Member,
            reference_id: "EXEC-2024-DEMO01".to_string(),
            user_name: "Alex Martin".to_string(),
            title: "Executive Coaching Member".to_string(),
            status: STATUS_ACTIVE.to_string(),
            score: None,
            details: json!({"badges": ["founding-member", "mentor"]}),
        },
        NewDocument {
            doc_type: DocumentType::Certificate,
            reference_id: "CERT-2024-DEMO01".to_string(),
            user_name: "Alex Martin".to_string(),
            title: "Leadership Fundamentals".to_string(),
            status: STATUS_ACTIVE.to_string(),
            score: Some(91.0),
            details: json!({}),
        },
        NewDocument {
            doc_type: DocumentType::PerformanceProfile,
            reference_id: "PERF-2024-DEMO01".to_string(),
            user_name: "Alex Martin".to_string(),
            title: "Performance Profile".to_string(),
            status: STATUS_ACTIVE.to_string(),
            score: Some(82.0),
            details: json!({
                "performance_metrics": {"communication": 8, "leadership": 9, "execution": 7}
            }),
        },
    ]
}
