pub mod document;
pub mod pdf;
pub mod store;

pub use crate::types::identifiers::DocumentVersion;
pub use document::{Document, DocumentError};
pub use pdf::{extract_text_from_pdf, write_extracted, PdfError};
pub use store::{load_configured, load_document, resolve_document_path, StoreError};
