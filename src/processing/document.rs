//! Per-request document: raw, truncated and escaped views of one input

use crate::error::{MatcherError, Result};
use crate::processing::sanitizer::{sanitize, truncate};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Resume,
    JobDescription,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Resume => write!(f, "resume"),
            DocumentType::JobDescription => write!(f, "job description"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    truncated: String,
    sanitized: String,
    original_length: usize,
}

impl Document {
    /// Cap the text at `max_len` characters and escape it.
    ///
    /// Fails with `EmptyInput` when nothing but whitespace is left. Oversize
    /// input is truncated, not rejected.
    pub fn new(document_type: DocumentType, raw: &str, max_len: usize) -> Result<Self> {
        let original_length = raw.chars().count();
        let truncated = truncate(raw, max_len);

        if truncated.trim().is_empty() {
            return Err(MatcherError::EmptyInput(document_type.to_string()));
        }

        if original_length > max_len {
            warn!(
                "Truncating {} from {} to {} characters",
                document_type, original_length, max_len
            );
        }

        Ok(Self {
            truncated: truncated.to_string(),
            sanitized: sanitize(truncated),
            original_length,
        })
    }

    /// Text after the length cap, unescaped
    pub fn truncated(&self) -> &str {
        &self.truncated
    }

    /// Truncated text, HTML-escaped once
    pub fn sanitized(&self) -> &str {
        &self.sanitized
    }

    pub fn original_length(&self) -> usize {
        self.original_length
    }

    pub fn was_truncated(&self) -> bool {
        self.original_length > self.truncated.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_views() {
        let doc = Document::new(DocumentType::Resume, "C++ & <Rust>", 100).unwrap();
        assert_eq!(doc.truncated(), "C++ & <Rust>");
        assert_eq!(doc.sanitized(), "C++ &amp; &lt;Rust&gt;");
        assert!(!doc.was_truncated());
    }

    #[test]
    fn test_oversize_is_truncated() {
        let raw = "a".repeat(11_000);
        let doc = Document::new(DocumentType::Resume, &raw, 10_000).unwrap();
        assert_eq!(doc.truncated().len(), 10_000);
        assert_eq!(doc.original_length(), 11_000);
        assert!(doc.was_truncated());
    }

    #[test]
    fn test_empty_input() {
        let err = Document::new(DocumentType::Resume, "   \n\t", 100).unwrap_err();
        assert!(matches!(err, MatcherError::EmptyInput(ref doc) if doc == "resume"));

        let err = Document::new(DocumentType::JobDescription, "", 100).unwrap_err();
        assert!(matches!(err, MatcherError::EmptyInput(ref doc) if doc == "job description"));
    }

    #[test]
    fn test_empty_after_truncation() {
        let err = Document::new(DocumentType::Resume, "     python", 3).unwrap_err();
        assert!(matches!(err, MatcherError::EmptyInput(_)));
    }
}
