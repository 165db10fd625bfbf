//! Match engine: keyword overlap, semantic score and highlighting for one
//! résumé / job description pair

use crate::config::{Config, VocabularyConfig, DEFAULT_MAX_SUGGESTIONS, DEFAULT_MAX_TEXT_LENGTH};
use crate::error::Result;
use crate::processing::document::{Document, DocumentType};
use crate::processing::embeddings::{Encoder, SimilarityScorer};
use crate::processing::highlighter::Highlighter;
use crate::processing::keywords::{ImportantKeywordFilter, KeywordExtractor, KeywordSet};
use crate::processing::set_matcher::SetMatcher;
use crate::processing::text_processor::TextProcessor;
use crate::processing::vocabulary::Vocabulary;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Result of one match request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Semantic similarity, 0-100
    pub score: f32,
    pub matching_keywords: KeywordSet,
    /// Job-only keywords, longest first, at most `max_suggestions`
    pub missing_keywords: Vec<String>,
    pub highlighted_resume: String,
    pub highlighted_job: String,
}

/// A [`MatchResult`] plus the intermediate data behind it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub result: MatchResult,
    pub resume_keywords: KeywordSet,
    pub job_keywords: KeywordSet,
    pub important_job_terms: KeywordSet,
    pub total_missing: usize,
    pub resume_truncated: bool,
    pub job_truncated: bool,
    pub encoder_name: String,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub max_text_length: usize,
    pub max_suggestions: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

impl From<&Config> for MatchOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_text_length: config.matching.max_text_length,
            max_suggestions: config.matching.max_suggestions,
        }
    }
}

/// Keyword views of a single text; needs no encoder
pub struct KeywordAnalyzer {
    processor: TextProcessor,
    extractor: KeywordExtractor,
    important_filter: ImportantKeywordFilter,
}

impl KeywordAnalyzer {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            processor: TextProcessor::new(),
            extractor: KeywordExtractor::new(Arc::clone(&vocabulary)),
            important_filter: ImportantKeywordFilter::new(vocabulary),
        }
    }

    /// Shared default vocabulary unless the config extends it
    pub fn from_config(config: &Config) -> Self {
        let vocabulary = config.vocabulary();
        if vocabulary == VocabularyConfig::default() {
            Self::new(Vocabulary::shared())
        } else {
            Self::new(Arc::new(Vocabulary::with_config(&vocabulary)))
        }
    }

    /// Canonical keyword set for one text
    pub fn keywords(&self, text: &str) -> KeywordSet {
        let tokens = self.processor.tokenize(text);
        self.extractor.extract(&tokens)
    }

    /// Stricter important-terms view for one text
    pub fn important_terms(&self, text: &str) -> KeywordSet {
        let tokens = self.processor.tokenize(text);
        self.important_filter.extract(&tokens)
    }
}

/// Stateless across requests: holds only read-only tables and the encoder,
/// so one engine can serve concurrent matches.
pub struct MatchEngine {
    analyzer: KeywordAnalyzer,
    scorer: SimilarityScorer,
    options: MatchOptions,
}

impl MatchEngine {
    /// Engine over the shared default vocabulary
    pub fn new(encoder: Arc<dyn Encoder>) -> Self {
        Self::with_analyzer(encoder, KeywordAnalyzer::new(Vocabulary::shared()), MatchOptions::default())
    }

    pub fn from_config(encoder: Arc<dyn Encoder>, config: &Config) -> Self {
        Self::with_analyzer(encoder, KeywordAnalyzer::from_config(config), MatchOptions::from(config))
    }

    pub fn with_analyzer(encoder: Arc<dyn Encoder>, analyzer: KeywordAnalyzer, options: MatchOptions) -> Self {
        Self {
            analyzer,
            scorer: SimilarityScorer::new(encoder),
            options,
        }
    }

    /// Match with the engine's configured limits
    pub fn match_documents(&self, resume_text: &str, job_text: &str) -> Result<MatchResult> {
        self.match_texts(resume_text, job_text, self.options.max_text_length, self.options.max_suggestions)
    }

    pub fn match_texts(
        &self,
        resume_text: &str,
        job_text: &str,
        max_text_length: usize,
        max_suggestions: usize,
    ) -> Result<MatchResult> {
        let options = MatchOptions {
            max_text_length,
            max_suggestions,
        };
        Ok(self.analyze_with(resume_text, job_text, options)?.result)
    }

    pub fn analyze(&self, resume_text: &str, job_text: &str) -> Result<MatchAnalysis> {
        self.analyze_with(resume_text, job_text, self.options)
    }

    fn analyze_with(&self, resume_text: &str, job_text: &str, options: MatchOptions) -> Result<MatchAnalysis> {
        let start_time = Instant::now();

        let resume = Document::new(DocumentType::Resume, resume_text, options.max_text_length)?;
        let job = Document::new(DocumentType::JobDescription, job_text, options.max_text_length)?;

        let resume_tokens = self.analyzer.processor.tokenize(resume.truncated());
        let job_tokens = self.analyzer.processor.tokenize(job.truncated());

        let resume_keywords = self.analyzer.extractor.extract(&resume_tokens);
        let job_keywords = self.analyzer.extractor.extract(&job_tokens);
        debug!(
            "Extracted {} resume keywords and {} job keywords",
            resume_keywords.len(),
            job_keywords.len()
        );

        let overlap = SetMatcher::new(options.max_suggestions).compare(&resume_keywords, &job_keywords);
        debug!(
            "{} matching keywords, {} missing ({} suggested)",
            overlap.matching.len(),
            overlap.total_missing,
            overlap.missing.len()
        );

        let score = self.scorer.score(resume.truncated(), job.truncated())?;

        let highlighter = Highlighter::new(&overlap.matching)?;
        let highlighted_resume = highlighter.highlight(resume.sanitized());
        let highlighted_job = highlighter.highlight(job.sanitized());

        let important_job_terms = self.analyzer.important_filter.extract(&job_tokens);

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        debug!("Match completed in {}ms (score {:.1})", processing_time_ms, score);

        Ok(MatchAnalysis {
            result: MatchResult {
                score,
                matching_keywords: overlap.matching,
                missing_keywords: overlap.missing,
                highlighted_resume,
                highlighted_job,
            },
            resume_keywords,
            job_keywords,
            important_job_terms,
            total_missing: overlap.total_missing,
            resume_truncated: resume.was_truncated(),
            job_truncated: job.was_truncated(),
            encoder_name: self.scorer.encoder_name().to_string(),
            processing_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatcherError;

    struct ConstantEncoder;

    impl Encoder for ConstantEncoder {
        fn encode(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.6, 0.8])
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    fn engine() -> MatchEngine {
        MatchEngine::new(Arc::new(ConstantEncoder))
    }

    #[test]
    fn test_match_scenario() {
        let result = engine()
            .match_documents(
                "Python developer with Flask and SQL experience",
                "Looking for Python developer with Django, SQL, and AWS",
            )
            .unwrap();

        for keyword in ["python", "developer", "sql"] {
            assert!(result.matching_keywords.contains(keyword), "{} not matched", keyword);
        }
        assert_eq!(result.missing_keywords, vec!["django", "aws"]);
        assert!((result.score - 100.0).abs() < 1e-3);
        assert!(result.highlighted_resume.contains("<mark>Python</mark>"));
        assert!(result.highlighted_job.contains("<mark>SQL</mark>"));
        assert!(!result.highlighted_job.contains("<mark>Django</mark>"));
    }

    #[test]
    fn test_empty_resume() {
        let err = engine().match_documents("", "Python developer").unwrap_err();
        assert!(matches!(err, MatcherError::EmptyInput(_)));
    }

    #[test]
    fn test_empty_job() {
        let err = engine().match_documents("Python developer", "  ").unwrap_err();
        assert!(matches!(err, MatcherError::EmptyInput(ref doc) if doc == "job description"));
    }

    #[test]
    fn test_suggestion_limit_respected() {
        let result = engine()
            .match_texts("Rust", "Docker Kubernetes Terraform Jenkins Ansible Prometheus Grafana", 10_000, 3)
            .unwrap();
        assert_eq!(result.missing_keywords, vec!["kubernetes", "prometheus", "terraform"]);
    }

    #[test]
    fn test_analysis_reports_truncation() {
        let long_resume = format!("python {}", "a".repeat(11_000));
        let analysis = engine().analyze(&long_resume, "Python developer").unwrap();
        assert!(analysis.resume_truncated);
        assert!(!analysis.job_truncated);
        assert_eq!(analysis.encoder_name, "constant");
    }

    #[test]
    fn test_important_terms_view() {
        let analyzer = KeywordAnalyzer::new(Vocabulary::shared());
        let terms = analyzer.important_terms("Managed Docker clusters, deployed Kubernetes");
        assert!(terms.contains("docker"));
        assert!(terms.contains("kubernetes"));
        assert!(terms.contains("clusters"));
        assert!(!terms.contains("managed"));
        assert!(!terms.contains("deployed"));
    }

    #[test]
    fn test_keyword_analyzer_on_unspaced_skill_list() {
        let analyzer = KeywordAnalyzer::new(Vocabulary::shared());
        let keywords = analyzer.keywords("Skills:Python,Django;Docker");
        assert_eq!(keywords.as_slice(), ["python", "django", "docker"]);
    }

    #[test]
    fn test_config_vocabulary_applied() {
        let mut config = Config::default();
        config.matching.extra_technical_terms = vec!["event sourcing".to_string()];
        let analyzer = KeywordAnalyzer::from_config(&config);
        assert!(analyzer.keywords("event sourcing").contains("event sourcing"));

        let result = MatchEngine::from_config(Arc::new(ConstantEncoder), &config)
            .match_documents("Event sourcing with Kafka", "Event sourcing and CQRS")
            .unwrap();
        assert!(result.matching_keywords.contains("event sourcing"));
    }
}
