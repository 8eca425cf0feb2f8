//! Axum route handlers for reference validation, verification, and issuance.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::reference::registry::document_info;
use crate::reference::{
    all_document_types, format, generate_short_id, get_document_info, validate, DocumentType,
    DocumentTypeInfo, ValidationResult,
};
use crate::state::AppState;
use crate::verification::dispatcher::{verify, FailureKind, VerificationOutcome};
use crate::verification::issuance::{issue_document, IssueRequest};
use crate::verification::record::VerificationRecord;
use crate::verification::stats::{document_stats, DocumentStats};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRequest {
    #[serde(default)]
    pub reference_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    #[serde(flatten)]
    pub result: ValidationResult,
    pub formatted_id: String,
    pub short_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_info: Option<&'static DocumentTypeInfo>,
}

impl IntoResponse for VerificationOutcome {
    fn into_response(self) -> Response {
        let status = match self.failure().map(|f| f.kind) {
            None => StatusCode::OK,
            Some(FailureKind::NotFound) => StatusCode::NOT_FOUND,
            Some(FailureKind::MissingInput) => StatusCode::BAD_REQUEST,
        };
        (status, Json(self)).into_response()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/verify/:reference_id
pub async fn handle_verify(
    State(state): State<AppState>,
    Path(reference_id): Path<String>,
) -> Result<VerificationOutcome, AppError> {
    verify(state.store.as_ref(), &reference_id).await
}

/// POST /api/v1/verify
///
/// Same as the GET form; a missing `referenceId` is treated as empty input.
pub async fn handle_verify_body(
    State(state): State<AppState>,
    Json(request): Json<ReferenceRequest>,
) -> Result<VerificationOutcome, AppError> {
    let reference_id = request.reference_id.unwrap_or_default();
    verify(state.store.as_ref(), &reference_id).await
}

/// POST /api/v1/reference/validate
///
/// Structural and semantic validation only; no storage lookup.
pub async fn handle_validate(Json(request): Json<ReferenceRequest>) -> Json<ValidateResponse> {
    let raw = request.reference_id.unwrap_or_default();
    Json(ValidateResponse {
        result: validate(&raw),
        formatted_id: format(&raw),
        short_id: generate_short_id(&raw),
        document_info: get_document_info(&raw),
    })
}

/// GET /api/v1/reference/types
pub async fn handle_list_types() -> Json<Vec<&'static DocumentTypeInfo>> {
    Json(all_document_types())
}

/// GET /api/v1/reference/types/:doc_type
///
/// Accepts a tag (`CERT`, `cert`) or a slug (`performance-profile`).
pub async fn handle_get_type(
    Path(name): Path<String>,
) -> Result<Json<&'static DocumentTypeInfo>, AppError> {
    let doc_type = name.parse::<DocumentType>().map_err(|e| {
        AppError::Validation(format!("{e}; valid types: {}", DocumentType::tag_list()))
    })?;
    Ok(Json(document_info(doc_type)))
}

/// GET /api/v1/reference/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<DocumentStats>, AppError> {
    let stats = document_stats(state.store.as_ref(), &state.stats_cache).await?;
    Ok(Json(stats))
}

/// POST /api/v1/documents
///
/// Mints a reference ID for a new document and persists it.
pub async fn handle_issue(
    State(state): State<AppState>,
    Json(request): Json<IssueRequest>,
) -> Result<(StatusCode, Json<VerificationRecord>), AppError> {
    let record = issue_document(state.store.as_ref(), request).await?;
    state.stats_cache.invalidate();
    Ok((StatusCode::CREATED, Json(record)))
}
