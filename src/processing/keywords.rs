//! Keyword extraction over normalized tokens

use crate::processing::vocabulary::Vocabulary;
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Characters stripped from both ends of a token before classification
const ENCLOSING_PUNCTUATION: &[char] = &['.', ',', '(', ')', '[', ']', '{', '}'];

/// Gerund, past-tense and adverb fragments rejected by the important-terms view
static WEAK_FRAGMENTS: Lazy<AhoCorasick> =
    Lazy::new(|| AhoCorasick::new(["ing", "ed", "ly"]).expect("Invalid fragment patterns"));

/// Deduplicated keywords in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the keyword was already present
    pub fn insert(&mut self, keyword: impl Into<String>) -> bool {
        let keyword = keyword.into();
        if self.members.contains(&keyword) {
            return false;
        }
        self.members.insert(keyword.clone());
        self.ordered.push(keyword);
        true
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.members.contains(keyword)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.ordered.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    /// Members also in `other`, in this set's order
    pub fn intersection(&self, other: &KeywordSet) -> KeywordSet {
        self.iter().filter(|k| other.contains(k)).cloned().collect()
    }

    /// Members absent from `other`, in this set's order
    pub fn difference(&self, other: &KeywordSet) -> KeywordSet {
        self.iter().filter(|k| !other.contains(k)).cloned().collect()
    }

    pub fn is_subset(&self, other: &KeywordSet) -> bool {
        self.iter().all(|k| other.contains(k))
    }
}

impl FromIterator<String> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = KeywordSet::new();
        for keyword in iter {
            set.insert(keyword);
        }
        set
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(keywords: Vec<String>) -> Self {
        keywords.into_iter().collect()
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(set: KeywordSet) -> Self {
        set.ordered
    }
}

/// Turns a token stream into the canonical keyword set.
///
/// Per token, left to right:
/// 1. strip enclosing punctuation
/// 2. skip short tokens (<= 2 chars) and stopwords
/// 3. a two-word dictionary term formed with the next token is emitted whole
/// 4. a single-word dictionary term is emitted
/// 5. tokens containing `.` or `-` are split; parts are emitted only when every part is longer than 2 chars
/// 6. other alphabetic tokens are emitted
///
/// Step 3 precedes step 4 so "machine learning" is not emitted as two words.
pub struct KeywordExtractor {
    vocabulary: Arc<Vocabulary>,
}

impl KeywordExtractor {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn extract(&self, tokens: &[String]) -> KeywordSet {
        let terms = self.vocabulary.technical_terms();
        let stopwords = self.vocabulary.stopwords();
        let mut keywords = KeywordSet::new();
        let mut i = 0;

        while i < tokens.len() {
            let token = strip_enclosing(&tokens[i]);

            if token.chars().count() <= 2 || stopwords.contains(token) {
                i += 1;
                continue;
            }

            if let Some(next) = tokens.get(i + 1) {
                let next = strip_enclosing(next);
                if terms.contains_pair(token, next) {
                    keywords.insert(format!("{} {}", token, next));
                    i += 2;
                    continue;
                }
            }

            if terms.contains(token) {
                keywords.insert(token);
            } else if token.contains('.') || token.contains('-') {
                let parts: Vec<&str> = token.split(|c| c == '.' || c == '-').collect();
                if parts.iter().all(|part| part.chars().count() > 2) {
                    for part in parts {
                        keywords.insert(part);
                    }
                }
            } else if token.chars().all(char::is_alphabetic) {
                keywords.insert(token);
            }

            i += 1;
        }

        keywords
    }
}

/// Stricter single-token view: allow-listed terms, or plain words that do
/// not look like gerunds, past tense or adverbs.
///
/// No two-word or compound handling. Its output is never merged with
/// [`KeywordExtractor`]'s.
pub struct ImportantKeywordFilter {
    vocabulary: Arc<Vocabulary>,
}

impl ImportantKeywordFilter {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn extract(&self, tokens: &[String]) -> KeywordSet {
        let stopwords = self.vocabulary.stopwords();
        let mut keywords = KeywordSet::new();

        for token in tokens {
            let token = strip_enclosing(token);

            if self.vocabulary.is_important_term(token) {
                keywords.insert(token);
            } else if token.chars().count() > 2
                && token.chars().all(char::is_alphabetic)
                && !stopwords.contains(token)
                && !WEAK_FRAGMENTS.is_match(token)
            {
                keywords.insert(token);
            }
        }

        keywords
    }
}

fn strip_enclosing(token: &str) -> &str {
    token.trim_matches(ENCLOSING_PUNCTUATION)
}
