//! Match report handed to the formatters

use crate::processing::analyzer::MatchAnalysis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Strong,
    Moderate,
    Weak,
    Poor,
}

impl Verdict {
    pub fn from_score(score: f32) -> Self {
        if score >= 75.0 {
            Verdict::Strong
        } else if score >= 50.0 {
            Verdict::Moderate
        } else if score >= 30.0 {
            Verdict::Weak
        } else {
            Verdict::Poor
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Verdict::Strong => "Strong match",
            Verdict::Moderate => "Moderate match",
            Verdict::Weak => "Weak match",
            Verdict::Poor => "Poor match",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub encoder: String,
    pub resume_source: String,
    pub job_source: String,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub verdict: Verdict,
    /// Share of job keywords present in the résumé, 0-100
    pub keyword_coverage: f32,
    pub analysis: MatchAnalysis,
    pub metadata: ReportMetadata,
}

impl MatchReport {
    pub fn new(analysis: MatchAnalysis, resume_source: &str, job_source: &str) -> Self {
        let keyword_coverage = if analysis.job_keywords.is_empty() {
            0.0
        } else {
            analysis.result.matching_keywords.len() as f32 / analysis.job_keywords.len() as f32 * 100.0
        };

        let metadata = ReportMetadata {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            encoder: analysis.encoder_name.clone(),
            resume_source: resume_source.to_string(),
            job_source: job_source.to_string(),
            processing_time_ms: analysis.processing_time_ms,
        };

        Self {
            verdict: Verdict::from_score(analysis.result.score),
            keyword_coverage,
            analysis,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_bands() {
        assert_eq!(Verdict::from_score(90.0), Verdict::Strong);
        assert_eq!(Verdict::from_score(75.0), Verdict::Strong);
        assert_eq!(Verdict::from_score(60.0), Verdict::Moderate);
        assert_eq!(Verdict::from_score(30.0), Verdict::Weak);
        assert_eq!(Verdict::from_score(0.0), Verdict::Poor);
    }
}
