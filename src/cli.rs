//! CLI interface for the resume matcher

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Match a resume against a job description")]
#[command(long_about = "Score a resume against a job description with sentence embeddings, list shared and missing keywords, and highlight the matches")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a resume with a job description
    Match {
        /// Path to resume file (PDF, TXT, MD), or - for stdin
        #[arg(short, long, conflicts_with = "resume_text")]
        resume: Option<PathBuf>,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Resume text given inline
        #[arg(long)]
        resume_text: Option<String>,

        /// Job description text given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Maximum characters kept from each document
        #[arg(long)]
        max_length: Option<usize>,

        /// Maximum number of suggested keywords
        #[arg(long)]
        suggestions: Option<usize>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include extracted keyword sets in the output
        #[arg(short, long)]
        detailed: bool,

        /// Print highlighted documents
        #[arg(long)]
        highlights: bool,
    },

    /// Print the keywords extracted from a file
    Keywords {
        /// Path to a PDF, TXT or MD file
        file: PathBuf,

        /// Also print the stricter important-terms view
        #[arg(short, long)]
        important: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Where a document's text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Inline(String),
}

impl InputSource {
    /// Label used in reports
    pub fn label(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Inline(_) => "inline text".to_string(),
        }
    }
}

/// Resolve a file/inline argument pair into a single source
pub fn input_source(path: Option<PathBuf>, text: Option<String>, name: &str) -> Result<InputSource, String> {
    match (path, text) {
        (Some(path), None) => Ok(InputSource::File(path)),
        (None, Some(text)) => Ok(InputSource::Inline(text)),
        (None, None) => Err(format!("No {} given: pass a file or inline text", name)),
        (Some(_), Some(_)) => Err(format!("Give the {} either as a file or as inline text, not both", name)),
    }
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}
