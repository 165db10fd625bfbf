//! Keyword extraction, matching, scoring and highlighting

pub mod sanitizer;
pub mod text_processor;
pub mod vocabulary;
pub mod keywords;
pub mod set_matcher;
pub mod embeddings;
pub mod highlighter;
pub mod document;
pub mod analyzer;
