// Reference IDs: minting, normalization, validation, and the document type registry.
// Pure and synchronous; nothing here touches storage.

pub mod codec;
pub mod document_type;
pub mod registry;
pub mod validation;

pub use codec::{format, generate, generate_with_code};
pub use document_type::DocumentType;
pub use registry::{all_document_types, DocumentTypeInfo};
pub use validation::{
    generate_short_id, get_document_info, is_document_type, validate, ValidationError,
    ValidationResult,
};
