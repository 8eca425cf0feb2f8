use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::reference::DocumentType;

/// Status of a document that no longer verifies.
pub const STATUS_REVOKED: &str = "revoked";
pub const STATUS_ACTIVE: &str = "active";

/// A document row from any of the reference-carrying tables.
///
/// Every table shares these columns; the reference column has a per-table name
/// (see the registry's `field_name`) and is aliased to `reference_id` on read.
/// Type-specific data lives in `details`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredDocument {
    pub id: Uuid,
    pub reference_id: String,
    pub user_name: String,
    pub title: String,
    pub status: String,
    pub score: Option<f64>,
    pub details: Value,
    pub issued_at: DateTime<Utc>,
}

/// A document about to be persisted. `reference_id` is already minted.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub doc_type: DocumentType,
    pub reference_id: String,
    pub user_name: String,
    pub title: String,
    pub status: String,
    pub score: Option<f64>,
    pub details: Value,
}
