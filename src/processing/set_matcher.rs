//! Keyword overlap and missing-keyword suggestions

use crate::processing::keywords::KeywordSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordOverlap {
    /// Résumé keywords also found in the job, in résumé order
    pub matching: KeywordSet,
    /// Up to `max_suggestions` job-only keywords, longest first
    pub missing: Vec<String>,
    /// Job-only keyword count before truncation
    pub total_missing: usize,
}

pub struct SetMatcher {
    max_suggestions: usize,
}

impl SetMatcher {
    pub fn new(max_suggestions: usize) -> Self {
        Self { max_suggestions }
    }

    pub fn compare(&self, resume: &KeywordSet, job: &KeywordSet) -> KeywordOverlap {
        let matching = resume.intersection(job);
        let candidates = job.difference(resume);
        let total_missing = candidates.len();

        KeywordOverlap {
            matching,
            missing: rank_suggestions(&candidates, self.max_suggestions),
            total_missing,
        }
    }
}

/// Longest keywords first.
///
/// The sort is stable, so equal lengths keep the set's first-seen order.
pub fn rank_suggestions(candidates: &KeywordSet, limit: usize) -> Vec<String> {
    let mut ranked: Vec<&String> = candidates.iter().collect();
    ranked.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    ranked.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> KeywordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_compare_scenario() {
        let resume = set(&["python", "developer", "flask", "sql"]);
        let job = set(&["python", "developer", "django", "sql", "aws"]);

        let overlap = SetMatcher::new(5).compare(&resume, &job);

        assert_eq!(overlap.matching, set(&["python", "developer", "sql"]));
        assert_eq!(overlap.missing, vec!["django", "aws"]);
        assert_eq!(overlap.total_missing, 2);
    }

    #[test]
    fn test_missing_sorted_by_length_and_capped() {
        let resume = set(&[]);
        let job = set(&["aws", "kubernetes", "git", "docker", "terraform", "jenkins", "sql"]);

        let overlap = SetMatcher::new(5).compare(&resume, &job);

        assert_eq!(overlap.missing, vec!["kubernetes", "terraform", "jenkins", "docker", "aws"]);
        assert_eq!(overlap.total_missing, 7);
    }

    #[test]
    fn test_equal_lengths_keep_first_seen_order() {
        let ranked = rank_suggestions(&set(&["sql", "aws", "git"]), 10);
        assert_eq!(ranked, vec!["sql", "aws", "git"]);
    }

    #[test]
    fn test_zero_suggestions() {
        let overlap = SetMatcher::new(0).compare(&set(&["rust"]), &set(&["go", "rust", "zig"]));
        assert!(overlap.missing.is_empty());
        assert_eq!(overlap.matching, set(&["rust"]));
    }

    #[test]
    fn test_subset_laws() {
        let resume = set(&["rust", "tokio", "serde", "linux"]);
        let job = set(&["rust", "axum", "linux", "postgresql", "docker"]);
        let overlap = SetMatcher::new(3).compare(&resume, &job);

        assert!(overlap.matching.is_subset(&resume));
        assert!(overlap.matching.is_subset(&job));
        for keyword in &overlap.missing {
            assert!(job.contains(keyword));
            assert!(!resume.contains(keyword));
        }
        assert!(overlap.missing.len() <= 3);
        assert!(overlap
            .missing
            .windows(2)
            .all(|w| w[0].chars().count() >= w[1].chars().count()));
    }
}
