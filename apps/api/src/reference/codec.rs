//! Mints and normalizes `TYPE-YEAR-CODE` reference IDs.
//!
//! Codes are random, not checked against previously issued IDs. The owning
//! row's primary key is what guarantees uniqueness.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Utc};
use rand::Rng;
use serde::{Serialize, Serializer};

use crate::reference::document_type::DocumentType;
use crate::reference::validation::{validate, ValidationError};

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const GENERATED_CODE_LEN: usize = 6;

/// Current calendar year. Every year computation in the process goes through
/// here so generation and validation agree (UTC).
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Mints a new reference ID for `doc_type` with a random 6-character code.
pub fn generate(doc_type: DocumentType) -> String {
    generate_with_code(doc_type, &random_code(GENERATED_CODE_LEN))
}

/// Mints a reference ID with a caller-supplied code, used verbatim.
pub fn generate_with_code(doc_type: DocumentType, code: &str) -> String {
    format!("{}-{}-{}", doc_type.tag(), current_year(), code)
}

fn random_code(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Lenient normalization applied before validation and lookups: trim + uppercase.
pub fn format(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// A structurally and semantically valid reference ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceId {
    pub doc_type: DocumentType,
    pub year: i32,
    pub code: String,
}

impl ReferenceId {
    /// Masked form for display contexts: `CERT-***C3`.
    pub fn short(&self) -> String {
        let keep = self.code.len().saturating_sub(2);
        format!("{}-***{}", self.doc_type.tag(), &self.code[keep..])
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.doc_type.tag(), self.year, self.code)
    }
}

impl FromStr for ReferenceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s).into_result()
    }
}

impl Serialize for ReferenceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
