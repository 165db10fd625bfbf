//! Marks matched keywords inside escaped text for display

use crate::error::{MatcherError, Result};
use crate::processing::keywords::KeywordSet;
use crate::processing::sanitizer::{escape_unescaped, sanitize, split_entities, Segment};
use regex::{Regex, RegexBuilder};

pub const HIGHLIGHT_OPEN: &str = "<mark>";
pub const HIGHLIGHT_CLOSE: &str = "</mark>";

pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    /// Build a case-insensitive whole-word matcher for the keyword set
    pub fn new(keywords: &KeywordSet) -> Result<Self> {
        if keywords.is_empty() {
            return Ok(Self { pattern: None });
        }

        // Longest first so "machine learning" wins over a shorter overlapping term
        let mut terms: Vec<&String> = keywords.iter().collect();
        terms.sort_by(|a, b| b.len().cmp(&a.len()));

        let alternatives: Vec<String> = terms.iter().map(|term| whole_word_pattern(term)).collect();

        let pattern = RegexBuilder::new(&alternatives.join("|"))
            .case_insensitive(true)
            .build()
            .map_err(|e| MatcherError::Processing(format!("Failed to build highlight pattern: {}", e)))?;

        Ok(Self { pattern: Some(pattern) })
    }

    /// Wrap every keyword occurrence in `<mark>` tags.
    ///
    /// The input is expected to be sanitized already. Any raw markup left in
    /// it is escaped, existing entities are kept as they are and never split
    /// by a match, and each marked span is escaped on its own before wrapping.
    pub fn highlight(&self, sanitized: &str) -> String {
        let safe = escape_unescaped(sanitized);
        let pattern = match &self.pattern {
            Some(pattern) => pattern,
            None => return safe,
        };

        let mut output = String::with_capacity(safe.len());
        for segment in split_entities(&safe) {
            match segment {
                Segment::Entity(entity) => output.push_str(entity),
                Segment::Text(text) => {
                    let mut last = 0;
                    for found in pattern.find_iter(text) {
                        output.push_str(&text[last..found.start()]);
                        output.push_str(HIGHLIGHT_OPEN);
                        output.push_str(&sanitize(found.as_str()));
                        output.push_str(HIGHLIGHT_CLOSE);
                        last = found.end();
                    }
                    output.push_str(&text[last..]);
                }
            }
        }

        output
    }
}

/// Escaped keyword with `\b` on each edge that is a word character.
///
/// `c++` gets only a leading boundary, since `\b` after `+` would require a
/// following word character.
fn whole_word_pattern(keyword: &str) -> String {
    let escaped = regex::escape(keyword);
    let leading = keyword.chars().next().map_or(false, is_word_char);
    let trailing = keyword.chars().last().map_or(false, is_word_char);

    format!(
        "{}{}{}",
        if leading { r"\b" } else { "" },
        escaped,
        if trailing { r"\b" } else { "" }
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(words: &[&str]) -> KeywordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn highlight(text: &str, words: &[&str]) -> String {
        Highlighter::new(&keywords(words)).unwrap().highlight(&sanitize(text))
    }

    #[test]
    fn test_highlights_whole_words_case_insensitively() {
        let output = highlight("Python developer, pythonic SQL", &["python", "sql"]);
        assert_eq!(output, "<mark>Python</mark> developer, pythonic <mark>SQL</mark>");
    }

    #[test]
    fn test_empty_keywords_roundtrip() {
        let text = "Tom & Jerry <b>\"quoted\"</b> it's";
        let sanitized = sanitize(text);
        let output = Highlighter::new(&KeywordSet::new()).unwrap().highlight(&sanitized);
        assert_eq!(output, sanitized);
    }

    #[test]
    fn test_script_never_survives() {
        let output = highlight("<script>alert('xss')</script> python", &["script", "python"]);
        assert!(!output.contains("<script>"));
        assert!(output.contains("&lt;<mark>script</mark>&gt;"));
    }

    #[test]
    fn test_unsanitized_input_still_escaped() {
        let highlighter = Highlighter::new(&keywords(&["rust"])).unwrap();
        let output = highlighter.highlight("<img src=x> rust");
        assert_eq!(output, "&lt;img src=x&gt; <mark>rust</mark>");
    }

    #[test]
    fn test_entities_are_not_split() {
        let output = highlight("R&D and amp wiring", &["amp"]);
        assert_eq!(output, "R&amp;D and <mark>amp</mark> wiring");
    }

    #[test]
    fn test_multi_word_and_symbol_keywords() {
        let output = highlight("Machine Learning in C++ and C", &["machine learning", "c++"]);
        assert_eq!(output, "<mark>Machine Learning</mark> in <mark>C++</mark> and C");
    }

    #[test]
    fn test_metacharacters_escaped() {
        let output = highlight("vue.js vuexjs", &["vue.js"]);
        assert_eq!(output, "<mark>vue.js</mark> vuexjs");
    }
}
