//! Configuration management for the resume matcher

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub matching: MatchingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub embedding_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub max_text_length: usize,
    pub max_suggestions: usize,
    #[serde(default)]
    pub extra_technical_terms: Vec<String>,
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
    pub max_pdf_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub show_highlights: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

/// Vocabulary customisation, applied once when the vocabulary is built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyConfig {
    pub extra_technical_terms: Vec<String>,
    pub extra_stopwords: Vec<String>,
}

pub const DEFAULT_MAX_TEXT_LENGTH: usize = 10_000;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;
pub const DEFAULT_MAX_PDF_BYTES: u64 = 5 * 1024 * 1024;

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-matcher")
            .join("models");

        Self {
            models: ModelConfig {
                models_dir,
                embedding_model: "minishlab/potion-base-8M".to_string(),
            },
            matching: MatchingConfig {
                max_text_length: DEFAULT_MAX_TEXT_LENGTH,
                max_suggestions: DEFAULT_MAX_SUGGESTIONS,
                extra_technical_terms: Vec::new(),
                extra_stopwords: Vec::new(),
                max_pdf_bytes: DEFAULT_MAX_PDF_BYTES,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                show_highlights: false,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.matching.max_text_length == 0 {
            return Err(MatcherError::Configuration(
                "matching.max_text_length must be greater than zero".to_string(),
            ));
        }
        if self.matching.max_pdf_bytes == 0 {
            return Err(MatcherError::Configuration(
                "matching.max_pdf_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn vocabulary(&self) -> VocabularyConfig {
        VocabularyConfig {
            extra_technical_terms: self.matching.extra_technical_terms.clone(),
            extra_stopwords: self.matching.extra_stopwords.clone(),
        }
    }

    /// Local model directory if downloaded, otherwise the hub id as given
    pub fn embedding_model_location(&self) -> PathBuf {
        let local_path = self.models.models_dir.join(&self.models.embedding_model);
        if local_path.exists() {
            local_path
        } else {
            PathBuf::from(&self.models.embedding_model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.matching.max_text_length, 10_000);
        assert_eq!(config.matching.max_suggestions, 5);
        assert_eq!(config.output.format, OutputFormat::Console);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.matching.max_suggestions = 3;
        config.matching.extra_technical_terms = vec!["htmx".to_string()];
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.matching.max_suggestions, 3);
        assert_eq!(loaded.vocabulary().extra_technical_terms, vec!["htmx".to_string()]);
    }

    #[test]
    fn test_rejects_zero_length() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.matching.max_text_length = 0;
        config.save_to(&path).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, MatcherError::Configuration(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "models = [").unwrap();

        assert!(matches!(Config::load_from(&path), Err(MatcherError::Configuration(_))));
    }
}
