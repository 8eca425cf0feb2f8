//! Resolves a user-supplied reference ID to the document it was printed on.
//!
//! Takes an unvalidated user string and probes every document table in
//! `LOOKUP_ORDER` for an exact match on the normalized string. Probing does
//! not depend on validation passing: legacy identifiers that predate the
//! `TYPE-YEAR-CODE` scheme are still stored and must still verify.
//!
//! Probes run sequentially and the first hit wins. The order is the
//! tie-break if the same string were ever stored in two tables.

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::reference::{
    format, is_document_type, validate, DocumentType, ValidationError, ValidationResult,
};
use crate::verification::record::VerificationRecord;
use crate::verification::store::DocumentStore;

pub const LOOKUP_ORDER: [DocumentType; 7] = [
    DocumentType::Member,
    DocumentType::Certificate,
    DocumentType::PerformanceProfile,
    DocumentType::Recommendation,
    DocumentType::RoleAlignment,
    DocumentType::CareerDiagnosis,
    DocumentType::SimulationScorecard,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Nothing was supplied; no table was probed.
    MissingInput,
    /// Every table was probed without a match.
    NotFound,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationFailure {
    #[serde(skip)]
    pub kind: FailureKind,
    pub error: String,
    pub message: String,
    pub provided_id: String,
    pub formatted_id: String,
    pub validation: ValidationResult,
}

/// `{success: true, data}` or `{success: false, error, message, providedId,
/// formattedId, validation}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum VerificationOutcome {
    Verified {
        success: bool,
        data: Box<VerificationRecord>,
    },
    Failed {
        success: bool,
        #[serde(flatten)]
        failure: VerificationFailure,
    },
}

impl VerificationOutcome {
    fn verified(record: VerificationRecord) -> Self {
        VerificationOutcome::Verified {
            success: true,
            data: Box::new(record),
        }
    }

    fn failed(failure: VerificationFailure) -> Self {
        VerificationOutcome::Failed {
            success: false,
            failure,
        }
    }

    pub fn record(&self) -> Option<&VerificationRecord> {
        match self {
            VerificationOutcome::Verified { data, .. } => Some(data.as_ref()),
            VerificationOutcome::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&VerificationFailure> {
        match self {
            VerificationOutcome::Verified { .. } => None,
            VerificationOutcome::Failed { failure, .. } => Some(failure),
        }
    }
}

/// Looks up a user-supplied reference ID across all document tables.
///
/// Expected failures (empty input, no match) are returned as
/// `VerificationOutcome::Failed`; only store errors are `Err`.
pub async fn verify(
    store: &dyn DocumentStore,
    provided: &str,
) -> Result<VerificationOutcome, AppError> {
    let formatted = format(provided);
    let validation = validate(provided);

    if let ValidationResult::Invalid(ValidationError::MissingInput) = validation {
        return Ok(VerificationOutcome::failed(VerificationFailure {
            kind: FailureKind::MissingInput,
            error: ValidationError::MissingInput.message(),
            message: "Enter the reference ID printed on the document".to_string(),
            provided_id: provided.to_string(),
            formatted_id: formatted,
            validation,
        }));
    }

    if let ValidationResult::Invalid(ref e) = validation {
        debug!("{formatted} failed validation ({}), probing as legacy ID", e.code());
    }

    for doc_type in LOOKUP_ORDER {
        if let Some(doc) = store.find_by_reference(doc_type, &formatted).await? {
            info!("Verified {formatted} as {}", doc_type.slug());
            if validation.is_valid() && !is_document_type(&formatted, doc_type) {
                debug!("{formatted} is stored outside the table its tag names");
            }
            return Ok(VerificationOutcome::verified(VerificationRecord::project(
                doc_type, &doc,
            )));
        }
    }

    info!("No document found for {formatted}");
    Ok(VerificationOutcome::failed(not_found(
        provided, formatted, validation,
    )))
}

fn not_found(provided: &str, formatted: String, validation: ValidationResult) -> VerificationFailure {
    let (error, message) = match validation.error() {
        Some(e) => (
            e.message(),
            e.suggestion()
                .unwrap_or_else(|| "Check the reference ID and try again".to_string()),
        ),
        None => (
            "Document not found".to_string(),
            format!("No document matches reference ID {formatted}"),
        ),
    };
    VerificationFailure {
        kind: FailureKind::NotFound,
        error,
        message,
        provided_id: provided.to_string(),
        formatted_id: formatted,
        validation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{NewDocument, StoredDocument, STATUS_ACTIVE};
    use crate::reference::generate;
    use crate::verification::store::InMemoryDocumentStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Mutex;

    async fn seed(store: &InMemoryDocumentStore, doc_type: DocumentType, reference: &str, name: &str) {
        store
            .insert(NewDocument {
                doc_type,
                reference_id: reference.to_string(),
                user_name: name.to_string(),
                title: "Career Accelerator".to_string(),
                status: STATUS_ACTIVE.to_string(),
                score: None,
                details: json!({}),
            })
            .await
            .unwrap();
    }

    /// Records every probe and never matches.
    #[derive(Default)]
    struct RecordingStore {
        probes: Mutex<Vec<DocumentType>>,
    }

    #[async_trait]
    impl DocumentStore for RecordingStore {
        async fn find_by_reference(
            &self,
            doc_type: DocumentType,
            _reference: &str,
        ) -> Result<Option<StoredDocument>, AppError> {
            self.probes.lock().unwrap().push(doc_type);
            Ok(None)
        }

        async fn insert(&self, _doc: NewDocument) -> Result<StoredDocument, AppError> {
            unreachable!("dispatcher never writes")
        }

        async fn count(&self, _doc_type: DocumentType) -> Result<i64, AppError> {
            Ok(0)
        }
    }

    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn find_by_reference(
            &self,
            _doc_type: DocumentType,
            _reference: &str,
        ) -> Result<Option<StoredDocument>, AppError> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn insert(&self, _doc: NewDocument) -> Result<StoredDocument, AppError> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn count(&self, _doc_type: DocumentType) -> Result<i64, AppError> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[test]
    fn test_lookup_order_covers_every_type_once() {
        let order: HashSet<DocumentType> = LOOKUP_ORDER.into_iter().collect();
        let all: HashSet<DocumentType> = DocumentType::ALL.into_iter().collect();
        assert_eq!(order, all);
        assert_eq!(LOOKUP_ORDER.len(), DocumentType::ALL.len());
    }

    #[tokio::test]
    async fn test_issue_and_verify_lowercase() {
        let store = InMemoryDocumentStore::new();
        let reference = generate(DocumentType::Certificate);
        seed(&store, DocumentType::Certificate, &reference, "Jane Doe").await;

        let outcome = verify(&store, &reference.to_lowercase()).await.unwrap();
        let record = outcome.record().unwrap();
        assert_eq!(record.user_name, "Jane Doe");
        assert!(record.verified);
        assert_eq!(record.doc_type, DocumentType::Certificate);
    }

    #[tokio::test]
    async fn test_malformed_input_is_not_found_with_format_hint() {
        let store = InMemoryDocumentStore::new();
        let outcome = verify(&store, "not-an-id").await.unwrap();
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::NotFound);
        assert_eq!(failure.error, "Invalid reference ID format");
        assert!(failure.message.contains("TYPE-YEAR-CODE"));
        assert_eq!(failure.provided_id, "not-an-id");
        assert_eq!(failure.formatted_id, "NOT-AN-ID");
    }

    #[tokio::test]
    async fn test_well_formed_but_absent() {
        let store = InMemoryDocumentStore::new();
        let outcome = verify(&store, "SIM-2026-ZZZZZZ").await.unwrap();
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::NotFound);
        assert_eq!(failure.error, "Document not found");
        assert!(failure.validation.is_valid());
    }

    #[tokio::test]
    async fn test_missing_input_skips_probes() {
        let store = RecordingStore::default();
        let outcome = verify(&store, "   ").await.unwrap();
        assert_eq!(outcome.failure().unwrap().kind, FailureKind::MissingInput);
        assert!(store.probes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_probes_follow_lookup_order() {
        let store = RecordingStore::default();
        verify(&store, "CERT-2026-AAAAAA").await.unwrap();
        assert_eq!(*store.probes.lock().unwrap(), LOOKUP_ORDER.to_vec());
    }

    #[tokio::test]
    async fn test_legacy_identifier_still_verifies() {
        let store = InMemoryDocumentStore::new();
        seed(&store, DocumentType::Recommendation, "REC-LEGACY-42", "Ana Ruiz").await;

        let outcome = verify(&store, " rec-legacy-42 ").await.unwrap();
        let record = outcome.record().unwrap();
        assert_eq!(record.user_name, "Ana Ruiz");
        assert_eq!(record.doc_type, DocumentType::Recommendation);
    }

    #[tokio::test]
    async fn test_tie_break_prefers_earlier_table() {
        let store = InMemoryDocumentStore::new();
        seed(&store, DocumentType::Recommendation, "DUP-2026-AAAA", "Recommended").await;
        seed(&store, DocumentType::PerformanceProfile, "DUP-2026-AAAA", "Profiled").await;

        let outcome = verify(&store, "DUP-2026-AAAA").await.unwrap();
        assert_eq!(
            outcome.record().unwrap().doc_type,
            DocumentType::PerformanceProfile
        );
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let result = verify(&FailingStore, "CERT-2026-AAAAAA").await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_success_payload_shape() {
        let store = InMemoryDocumentStore::new();
        seed(&store, DocumentType::Member, "EXEC-2025-DEMO01", "Jane Doe").await;

        let json = serde_json::to_value(verify(&store, "exec-2025-demo01").await.unwrap()).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["userName"], "Jane Doe");
        assert_eq!(json["data"]["referenceId"], "EXEC-2025-DEMO01");
    }

    #[tokio::test]
    async fn test_failure_payload_shape() {
        let store = InMemoryDocumentStore::new();
        let json = serde_json::to_value(verify(&store, "xxxx-2026-aaaa").await.unwrap()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["providedId"], "xxxx-2026-aaaa");
        assert_eq!(json["formattedId"], "XXXX-2026-AAAA");
        assert_eq!(json["validation"]["valid"], false);
        assert!(json["error"].as_str().unwrap().starts_with("Unknown document type"));
        assert!(json.get("kind").is_none());
    }
}
