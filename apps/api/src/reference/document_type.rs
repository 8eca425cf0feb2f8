//! Document types that can carry a reference ID.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of document categories that embed a reference ID.
///
/// Serializes as the uppercase tag (`"CERT"`, `"SIM"`, ...), which is also the
/// first segment of every reference ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "EXEC")]
    Member,
    #[serde(rename = "CERT")]
    Certificate,
    #[serde(rename = "REC")]
    Recommendation,
    #[serde(rename = "PERF")]
    PerformanceProfile,
    #[serde(rename = "ALIGN")]
    RoleAlignment,
    #[serde(rename = "SCI")]
    CareerDiagnosis,
    #[serde(rename = "SIM")]
    SimulationScorecard,
}

impl DocumentType {
    pub const ALL: [DocumentType; 7] = [
        DocumentType::Member,
        DocumentType::Certificate,
        DocumentType::Recommendation,
        DocumentType::PerformanceProfile,
        DocumentType::RoleAlignment,
        DocumentType::CareerDiagnosis,
        DocumentType::SimulationScorecard,
    ];

    /// The uppercase tag used as the first segment of a reference ID.
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentType::Member => "EXEC",
            DocumentType::Certificate => "CERT",
            DocumentType::Recommendation => "REC",
            DocumentType::PerformanceProfile => "PERF",
            DocumentType::RoleAlignment => "ALIGN",
            DocumentType::CareerDiagnosis => "SCI",
            DocumentType::SimulationScorecard => "SIM",
        }
    }

    /// Kebab-case name used in URLs and logs.
    pub fn slug(&self) -> &'static str {
        match self {
            DocumentType::Member => "member",
            DocumentType::Certificate => "certificate",
            DocumentType::Recommendation => "recommendation",
            DocumentType::PerformanceProfile => "performance-profile",
            DocumentType::RoleAlignment => "role-alignment",
            DocumentType::CareerDiagnosis => "career-diagnosis",
            DocumentType::SimulationScorecard => "simulation-scorecard",
        }
    }

    /// Exact match against an uppercase tag. Used by the validator after
    /// normalization, so no case folding happens here.
    pub fn from_tag(tag: &str) -> Option<DocumentType> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Comma-separated list of every tag, e.g. for error suggestions.
    pub fn tag_list() -> String {
        Self::ALL
            .iter()
            .map(|t| t.tag())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document type '{0}'")]
pub struct UnknownDocumentType(pub String);

/// Accepts either a tag (`cert`, `CERT`) or a slug (`performance-profile`).
impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_uppercase();
        let lower = trimmed.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.tag() == upper || t.slug() == lower)
            .ok_or_else(|| UnknownDocumentType(s.to_string()))
    }
}
