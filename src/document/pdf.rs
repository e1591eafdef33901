//! PDF text extraction
//!
//! Produces the plain-text brand guide the store loads. Extraction runs
//! offline (`brand-context extract`), never on the request path.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to load PDF {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
    #[error("No text extracted from {path}; the PDF may be scanned images")]
    Empty { path: PathBuf },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Extract the text of every page, pages joined with a newline.
///
/// Pages that fail to decode are skipped with a warning. Whitespace is kept
/// as extracted: section headings must stay intact for anchor search.
pub fn extract_text_from_pdf(path: &Path) -> Result<String, PdfError> {
    let doc = lopdf::Document::load(path).map_err(|source| PdfError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    let pages = doc.get_pages();
    debug!(page_count = pages.len(), "Extracting text from PDF");

    let mut parts = Vec::with_capacity(pages.len());
    for page_num in pages.keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(text) => parts.push(text),
            Err(e) => {
                warn!(page = page_num, error = %e, "Failed to extract text from page, skipping");
            }
        }
    }

    let text = parts.join("\n");
    if text.trim().is_empty() {
        return Err(PdfError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(text)
}

/// Extract `pdf` into `out`, returning the extracted text.
pub fn write_extracted(pdf: &Path, out: &Path) -> Result<String, PdfError> {
    let text = extract_text_from_pdf(pdf)?;

    std::fs::write(out, &text).map_err(|source| PdfError::Write {
        path: out.to_path_buf(),
        source,
    })?;

    info!(
        pdf = %pdf.display(),
        out = %out.display(),
        chars = text.chars().count(),
        "Extraction complete"
    );

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_pdf_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_text_from_pdf(&dir.path().join("absent.pdf"));
        assert!(matches!(result, Err(PdfError::Load { .. })));
    }

    #[test]
    fn non_pdf_bytes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.pdf");
        std::fs::write(&path, b"OUR SERVICES & AMENITIES, not a pdf").unwrap();

        let out = dir.path().join("pdf_text.txt");
        let result = write_extracted(&path, &out);

        assert!(matches!(result, Err(PdfError::Load { .. })));
        assert!(!out.exists(), "nothing is written when extraction fails");
    }
}
