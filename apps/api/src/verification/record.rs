//! Normalized verification view computed from whichever table matched.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::models::document::{StoredDocument, STATUS_REVOKED};
use crate::reference::registry::{document_info, Locale, LocalizedText};
use crate::reference::DocumentType;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentInfoView {
    pub names: LocalizedText,
    pub descriptions: LocalizedText,
}

/// Common shape returned for every document type. Type-specific fields are
/// omitted from JSON when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub type_name: &'static str,
    pub user_name: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub status: String,
    pub reference_id: String,
    pub verified: bool,
    pub document_info: DocumentInfoView,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_metrics: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badges: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

impl VerificationRecord {
    pub fn project(doc_type: DocumentType, doc: &StoredDocument) -> Self {
        let info = document_info(doc_type);
        let mut record = VerificationRecord {
            doc_type,
            type_name: info.names.get(Locale::En),
            user_name: doc.user_name.clone(),
            title: doc.title.clone(),
            date: doc.issued_at,
            status: doc.status.clone(),
            reference_id: doc.reference_id.clone(),
            verified: !doc.status.eq_ignore_ascii_case(STATUS_REVOKED),
            document_info: DocumentInfoView {
                names: info.names.clone(),
                descriptions: info.descriptions.clone(),
            },
            score: None,
            performance_metrics: None,
            badges: None,
            recommender_name: None,
            target_role: None,
            diagnosis_summary: None,
            scenario: None,
        };

        // No wildcard arm: a new document type must decide what it exposes.
        match doc_type {
            DocumentType::Member => {
                record.badges = string_list(&doc.details, "badges");
            }
            DocumentType::Certificate => {
                record.score = doc.score;
            }
            DocumentType::Recommendation => {
                record.recommender_name = string_field(&doc.details, "recommender_name");
            }
            DocumentType::PerformanceProfile => {
                record.score = doc.score;
                record.performance_metrics = doc
                    .details
                    .get("performance_metrics")
                    .filter(|v| !v.is_null())
                    .cloned();
            }
            DocumentType::RoleAlignment => {
                record.score = doc.score;
                record.target_role = string_field(&doc.details, "target_role");
            }
            DocumentType::CareerDiagnosis => {
                record.diagnosis_summary = string_field(&doc.details, "summary");
            }
            DocumentType::SimulationScorecard => {
                record.score = doc.score;
                record.scenario = string_field(&doc.details, "scenario");
            }
        }

        record
    }
}

fn string_field(details: &Value, key: &str) -> Option<String> {
    details.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

fn string_list(details: &Value, key: &str) -> Option<Vec<String>> {
    details.get(key).and_then(|v| v.as_array()).map(|items| {
        items
            .iter()
            .filter_map(|i| i.as_str())
            .map(str::to_string)
            .collect()
    })
}
