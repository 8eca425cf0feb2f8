//! Layered checks for user-supplied reference IDs.
//!
//! Layers run in order and stop at the first failure:
//! 1. presence (`MissingInput`)
//! 2. shape `TYPE-YEAR-CODE` after normalization (`MalformedShape`)
//! 3. type membership (`UnknownType`)
//! 4. year in `[MIN_YEAR, current_year + 1]` (`InvalidYear`)
//!
//! None of these are exceptional: callers get a `ValidationResult` value.

use std::sync::LazyLock;

use regex::Regex;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::reference::codec::{current_year, format, ReferenceId};
use crate::reference::document_type::DocumentType;
use crate::reference::registry::{document_info, DocumentTypeInfo};

/// Earliest issuance year accepted.
pub const MIN_YEAR: i32 = 2020;

static SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]+)-([0-9]{4})-([A-Z0-9]{4,8})$").expect("reference ID pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Reference ID is required")]
    MissingInput,

    #[error("Invalid reference ID format")]
    MalformedShape { current_year: i32 },

    #[error("Unknown document type: {tag}")]
    UnknownType { tag: String },

    #[error("Invalid year: {year}")]
    InvalidYear { year: i32, max_year: i32 },
}

impl ValidationError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingInput => "MISSING_INPUT",
            ValidationError::MalformedShape { .. } => "MALFORMED_SHAPE",
            ValidationError::UnknownType { .. } => "UNKNOWN_TYPE",
            ValidationError::InvalidYear { .. } => "INVALID_YEAR",
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    /// A hint the UI can show next to the error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ValidationError::MissingInput => None,
            ValidationError::MalformedShape { current_year } => Some(format!(
                "Expected format TYPE-YEAR-CODE, e.g. CERT-{current_year}-A1B2C3"
            )),
            ValidationError::UnknownType { .. } => {
                Some(format!("Valid types: {}", DocumentType::tag_list()))
            }
            ValidationError::InvalidYear { max_year, .. } => Some(format!(
                "Year must be between {MIN_YEAR} and {max_year}"
            )),
        }
    }
}

/// Outcome of `validate`. A value, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(ReferenceId),
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub fn reference(&self) -> Option<&ReferenceId> {
        match self {
            ValidationResult::Valid(id) => Some(id),
            ValidationResult::Invalid(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<ReferenceId, ValidationError> {
        match self {
            ValidationResult::Valid(id) => Ok(id),
            ValidationResult::Invalid(e) => Err(e),
        }
    }
}

/// `{valid: true, type, year, code}` or `{valid: false, error, suggestion?}`.
impl Serialize for ValidationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ValidationResult::Valid(id) => {
                let mut s = serializer.serialize_struct("ValidationResult", 4)?;
                s.serialize_field("valid", &true)?;
                s.serialize_field("type", &id.doc_type)?;
                s.serialize_field("year", &id.year)?;
                s.serialize_field("code", &id.code)?;
                s.end()
            }
            ValidationResult::Invalid(e) => {
                let suggestion = e.suggestion();
                let len = if suggestion.is_some() { 3 } else { 2 };
                let mut s = serializer.serialize_struct("ValidationResult", len)?;
                s.serialize_field("valid", &false)?;
                s.serialize_field("error", &e.message())?;
                if let Some(suggestion) = suggestion {
                    s.serialize_field("suggestion", &suggestion)?;
                } else {
                    s.skip_field("suggestion")?;
                }
                s.end()
            }
        }
    }
}

/// Validates a reference ID against the current UTC year.
pub fn validate(raw: &str) -> ValidationResult {
    validate_at(raw, current_year())
}

/// Validates a reference ID against an explicit `current_year`.
pub fn validate_at(raw: &str, current_year: i32) -> ValidationResult {
    match check(raw, current_year) {
        Ok(id) => ValidationResult::Valid(id),
        Err(e) => ValidationResult::Invalid(e),
    }
}

fn check(raw: &str, current_year: i32) -> Result<ReferenceId, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::MissingInput);
    }

    let formatted = format(raw);
    let caps = SHAPE
        .captures(&formatted)
        .ok_or(ValidationError::MalformedShape { current_year })?;

    let tag = &caps[1];
    let doc_type = DocumentType::from_tag(tag).ok_or_else(|| ValidationError::UnknownType {
        tag: tag.to_string(),
    })?;

    let year: i32 = caps[2]
        .parse()
        .map_err(|_| ValidationError::MalformedShape { current_year })?;
    let max_year = current_year + 1;
    if !(MIN_YEAR..=max_year).contains(&year) {
        return Err(ValidationError::InvalidYear { year, max_year });
    }

    Ok(ReferenceId {
        doc_type,
        year,
        code: caps[3].to_string(),
    })
}

/// Registry entry for a valid reference ID, `None` otherwise.
pub fn get_document_info(raw: &str) -> Option<&'static DocumentTypeInfo> {
    extract_document_type(raw).map(document_info)
}

pub fn extract_document_type(raw: &str) -> Option<DocumentType> {
    validate(raw).reference().map(|id| id.doc_type)
}

pub fn is_document_type(raw: &str, doc_type: DocumentType) -> bool {
    extract_document_type(raw) == Some(doc_type)
}

const SHORT_FALLBACK_LEN: usize = 8;

/// Display-safe short form: `CERT-***C3` for valid IDs, otherwise the first
/// eight characters of the normalized input followed by `...`.
pub fn generate_short_id(raw: &str) -> String {
    match validate(raw) {
        ValidationResult::Valid(id) => id.short(),
        ValidationResult::Invalid(_) => {
            let prefix: String = format(raw).chars().take(SHORT_FALLBACK_LEN).collect();
            format!("{prefix}...")
        }
    }
}
