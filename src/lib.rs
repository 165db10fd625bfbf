//! Résumé / job description matching library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use processing::analyzer::{KeywordAnalyzer, MatchAnalysis, MatchEngine, MatchOptions, MatchResult};
pub use processing::embeddings::{Encoder, Model2VecEncoder};
pub use processing::keywords::KeywordSet;
