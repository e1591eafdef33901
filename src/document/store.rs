//! Loading the brand guide from disk.
//!
//! The guide is read exactly once at startup. A missing file is fatal to the
//! caller: the service cannot answer anything without it.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::document::{Document, DocumentError};
use crate::config::DocumentConfig;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Document {path} is not valid text: {source}")]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
    #[error("Document not found. Locations tried:\n- {}", display_paths(.tried))]
    NotFound { tried: Vec<PathBuf> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n- ")
}

/// Read a UTF-8 text file into a [`Document`].
pub fn load_document(path: &Path) -> Result<Document, StoreError> {
    let raw = std::fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document = Document::ingest(path.display().to_string(), raw).map_err(|source| {
        StoreError::InvalidDocument {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        source = %path.display(),
        chars = document.char_len(),
        version = document.version().short(),
        "Document loaded"
    );

    Ok(document)
}

/// First candidate that exists on disk, in the order given.
pub fn resolve_document_path(candidates: &[PathBuf]) -> Result<PathBuf, StoreError> {
    for candidate in candidates {
        if candidate.is_file() {
            debug!(path = %candidate.display(), "Resolved document path");
            return Ok(candidate.clone());
        }
        debug!(path = %candidate.display(), "Document candidate missing");
    }

    Err(StoreError::NotFound {
        tried: candidates.to_vec(),
    })
}

/// Load the document named by configuration: the explicit path when set,
/// otherwise the first existing candidate.
pub fn load_configured(config: &DocumentConfig) -> Result<Document, StoreError> {
    let path = match &config.path {
        Some(path) => path.clone(),
        None => resolve_document_path(&config.candidates)?,
    };
    load_document(&path)
}
