//! Issuing documents: mint a reference ID, persist it with the document.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::document::{NewDocument, STATUS_ACTIVE};
use crate::reference::{format, generate, generate_with_code, validate, DocumentType};
use crate::verification::record::VerificationRecord;
use crate::verification::store::DocumentStore;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    pub document_type: DocumentType,
    pub user_name: String,
    pub title: String,
    #[serde(default)]
    pub score: Option<f64>,
    /// Type-specific payload (badges, performance metrics, target role, ...).
    #[serde(default)]
    pub details: Option<Value>,
    /// Overrides the random code. Normalized like any other input, and the
    /// resulting reference ID must validate.
    #[serde(default)]
    pub custom_code: Option<String>,
}

pub async fn issue_document(
    store: &dyn DocumentStore,
    request: IssueRequest,
) -> Result<VerificationRecord, AppError> {
    if request.user_name.trim().is_empty() {
        return Err(AppError::Validation("userName cannot be empty".to_string()));
    }
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let doc_type = request.document_type;
    // Lookups only ever see the normalized form, so that is what gets stored.
    let reference_id = format(&match request.custom_code.as_deref() {
        Some(code) => generate_with_code(doc_type, code),
        None => generate(doc_type),
    });
    if let Some(err) = validate(&reference_id).error() {
        return Err(AppError::Validation(format!(
            "customCode does not form a valid reference ID ({reference_id}): {}",
            err.message()
        )));
    }

    let stored = store
        .insert(NewDocument {
            doc_type,
            reference_id,
            user_name: request.user_name.trim().to_string(),
            title: request.title.trim().to_string(),
            status: STATUS_ACTIVE.to_string(),
            score: request.score,
            details: request.details.unwrap_or_else(|| Value::Object(Default::default())),
        })
        .await?;

    info!("Issued {} {}", doc_type.slug(), stored.reference_id);
    Ok(VerificationRecord::project(doc_type, &stored))
}
