use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::identifiers::DocumentVersion;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Content must be valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// The brand guide, held read-only for the life of the process.
///
/// Besides the text itself a document keeps an upper-cased copy for
/// case-insensitive anchor search and the offset tables needed to translate
/// matches back into character positions of the original text. Upper-casing
/// can change byte lengths (`ß` becomes `SS`), so byte offsets into the
/// folded copy are never used to slice the original directly.
#[derive(Debug, Clone)]
pub struct Document {
    version: DocumentVersion,
    source: String,
    content: String,
    loaded_at: DateTime<Utc>, // informational only
    folded: String,
    // byte offset of every char in `content`, plus `content.len()`
    char_offsets: Vec<usize>,
    // byte offset in `folded` where the upper form of each char starts
    folded_offsets: Vec<usize>,
}

impl Document {
    /// Ingest raw bytes into a Document.
    ///
    /// Version is computed on the verified content. No newline or whitespace
    /// normalization is performed.
    pub fn ingest(source: impl Into<String>, raw_content: Vec<u8>) -> Result<Self, DocumentError> {
        let content = String::from_utf8(raw_content)?;
        Ok(Self::from_text(source, content))
    }

    pub fn from_text(source: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let version = DocumentVersion::from_content(content.as_bytes());

        let mut folded = String::with_capacity(content.len());
        let mut char_offsets = Vec::with_capacity(content.len() + 1);
        let mut folded_offsets = Vec::with_capacity(content.len());

        for (offset, ch) in content.char_indices() {
            char_offsets.push(offset);
            folded_offsets.push(folded.len());
            folded.extend(ch.to_uppercase());
        }
        char_offsets.push(content.len());

        Document {
            version,
            source: source.into(),
            content,
            loaded_at: Utc::now(),
            folded,
            char_offsets,
            folded_offsets,
        }
    }

    pub fn version(&self) -> &DocumentVersion {
        &self.version
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Upper-cased form used for anchor search.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.char_offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Character index of the first case-insensitive, literal occurrence of
    /// `anchor`.
    pub fn find(&self, anchor: &str) -> Option<usize> {
        let needle = anchor.to_uppercase();
        let byte = self.folded.find(&needle)?;

        // The char whose upper form covers `byte`.
        Some(
            self.folded_offsets
                .partition_point(|&offset| offset <= byte)
                .saturating_sub(1),
        )
    }

    /// Characters `[start, end)`, clamped to the document.
    pub fn slice_chars(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.char_len());
        let start = start.min(end);
        &self.content[self.char_offsets[start]..self.char_offsets[end]]
    }

    /// The first `max_chars` characters.
    pub fn head(&self, max_chars: usize) -> &str {
        self.slice_chars(0, max_chars)
    }
}
