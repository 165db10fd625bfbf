//! Semantic similarity via an injected text encoder

use crate::error::{MatcherError, Result};
use log::{info, warn};
use model2vec_rs::model::StaticModel;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Black-box text -> vector encoder.
///
/// Must be safe to call from several threads at once.
pub trait Encoder: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<f32>>;

    fn name(&self) -> &str;
}

/// Model2Vec static embeddings
pub struct Model2VecEncoder {
    model: StaticModel,
    model_name: String,
}

impl Model2VecEncoder {
    /// Load from a local model directory or a HuggingFace repo id
    pub fn load(model_path: &Path) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading Model2Vec embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| MatcherError::ScoringUnavailable(format!("Failed to load model: {}", e)))?;

        info!("Model loaded in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: model_path.to_string_lossy().to_string(),
        })
    }
}

impl Encoder for Model2VecEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        // The model's tokenizer panics on failure instead of returning an error
        panic::catch_unwind(AssertUnwindSafe(|| self.model.encode_single(text)))
            .map_err(|_| MatcherError::ScoringUnavailable(format!("{} failed to encode text", self.model_name)))
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

/// Cosine similarity of two embeddings.
///
/// Empty, mismatched, zero-norm or non-finite inputs are errors rather than
/// a 0.0 that would read as a genuine poor match.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.is_empty() || b.is_empty() {
        return Err(MatcherError::ScoringUnavailable("Encoder returned an empty embedding".to_string()));
    }

    if a.len() != b.len() {
        return Err(MatcherError::ScoringUnavailable(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(MatcherError::ScoringUnavailable("Encoder returned a zero vector".to_string()));
    }

    let score = dot_product / (norm_a * norm_b);
    if !score.is_finite() {
        return Err(MatcherError::ScoringUnavailable("Similarity is not a finite number".to_string()));
    }

    Ok(score)
}

/// Encodes both texts and turns their cosine similarity into a 0-100 score
pub struct SimilarityScorer {
    encoder: Arc<dyn Encoder>,
}

impl SimilarityScorer {
    pub fn new(encoder: Arc<dyn Encoder>) -> Self {
        Self { encoder }
    }

    pub fn score(&self, resume_text: &str, job_text: &str) -> Result<f32> {
        let resume_embedding = self.encode(resume_text)?;
        let job_embedding = self.encode(job_text)?;

        let similarity = cosine_similarity(&resume_embedding, &job_embedding)?;

        // Opposed vectors carry no more signal than orthogonal ones
        Ok((similarity * 100.0).clamp(0.0, 100.0))
    }

    pub fn encoder_name(&self) -> &str {
        self.encoder.name()
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        self.encoder.encode(text).map_err(|e| {
            warn!("Encoder '{}' failed: {}", self.encoder.name(), e);
            match e {
                MatcherError::ScoringUnavailable(_) => e,
                other => MatcherError::ScoringUnavailable(other.to_string()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedEncoder(Vec<f32>, Vec<f32>);

    impl Encoder for FixedEncoder {
        fn encode(&self, text: &str) -> Result<Vec<f32>> {
            if text.starts_with("resume") {
                Ok(self.0.clone())
            } else {
                Ok(self.1.clone())
            }
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingEncoder;

    impl Encoder for FailingEncoder {
        fn encode(&self, _text: &str) -> Result<Vec<f32>> {
            Err(MatcherError::Processing("inference crashed".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap() - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap().abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 1.0], &[1.0, 0.0]).unwrap() - 0.70710677).abs() < 1e-5);
    }

    #[test]
    fn test_cosine_rejects_degenerate_vectors() {
        assert!(cosine_similarity(&[], &[]).is_err());
        assert!(cosine_similarity(&[1.0], &[1.0, 2.0]).is_err());
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_score_scaled_to_percentage() {
        let scorer = SimilarityScorer::new(Arc::new(FixedEncoder(vec![1.0, 1.0], vec![1.0, 0.0])));
        let score = scorer.score("resume text", "job text").unwrap();
        assert!((score - 70.710677).abs() < 1e-3);
    }

    #[test]
    fn test_negative_similarity_clamped() {
        let scorer = SimilarityScorer::new(Arc::new(FixedEncoder(vec![1.0, 0.0], vec![-1.0, 0.0])));
        assert_eq!(scorer.score("resume", "job").unwrap(), 0.0);
    }

    #[test]
    fn test_encoder_failure_is_scoring_unavailable() {
        let scorer = SimilarityScorer::new(Arc::new(FailingEncoder));
        let err = scorer.score("resume", "job").unwrap_err();
        assert!(matches!(err, MatcherError::ScoringUnavailable(_)));
    }

    #[test]
    fn test_zero_vector_is_not_a_zero_score() {
        let scorer = SimilarityScorer::new(Arc::new(FixedEncoder(vec![0.0, 0.0], vec![1.0, 0.0])));
        assert!(matches!(scorer.score("resume", "job"), Err(MatcherError::ScoringUnavailable(_))));
    }
}
