//! Error handling for the resume matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("Empty input: please provide {0} text")]
    EmptyInput(String),

    #[error("Similarity scoring unavailable: {0}")]
    ScoringUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error processing PDF: {0}")]
    PdfExtraction(String),

    #[error("File too large: {path} is {size} bytes (limit {limit} bytes)")]
    FileTooLarge { path: String, size: u64, limit: u64 },

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, MatcherError>;

/// The embedding model loader reports through anyhow
impl From<anyhow::Error> for MatcherError {
    fn from(err: anyhow::Error) -> Self {
        MatcherError::ScoringUnavailable(err.to_string())
    }
}

impl MatcherError {
    /// Whether the caller can recover by resupplying input or retrying
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MatcherError::EmptyInput(_)
                | MatcherError::ScoringUnavailable(_)
                | MatcherError::FileTooLarge { .. }
                | MatcherError::PdfExtraction(_)
        )
    }
}
