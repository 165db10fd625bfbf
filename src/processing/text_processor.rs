//! Text normalization and word tokenization

use unicode_segmentation::UnicodeSegmentation;

/// Literal rewrites applied, in order, to lowercased text before tokenizing.
///
/// Plain substring replacement with no word-boundary checks.
pub const DEFAULT_REWRITES: &[(&str, &str)] = &[
    ("node.js", "nodejs"),
    ("express.js", "expressjs"),
    ("react.js", "react"),
    ("vue.js", "vuejs"),
    ("next.js", "nextjs"),
    ("nuxt.js", "nuxtjs"),
    ("angular.js", "angularjs"),
    ("dev ops", "devops"),
    ("dev-ops", "devops"),
    ("front-end", "frontend"),
    ("back-end", "backend"),
    ("full-stack", "full stack"),
    ("machine-learning", "machine learning"),
];

/// Contraction suffixes split off a word, longest first
const CONTRACTIONS: &[&str] = &["n't", "'re", "'ve", "'ll", "'s", "'d", "'m"];

/// Splits normalized text into word-level tokens.
///
/// Implementations must be shareable across threads; the matcher holds one
/// per process.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Treebank-style word tokenizer.
///
/// Leading and trailing punctuation is split into separate tokens. Inside a
/// chunk, `;` always splits, and `,` / `:` split unless a digit follows
/// (`1,000`, `10:30`). Other internal punctuation (`node.js`, `ci/cd`,
/// `e-commerce`) stays attached, and English contractions are split
/// (`don't` -> `do`, `n't`).
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();

        for chunk in text.split_whitespace() {
            for piece in split_clauses(chunk) {
                push_word(piece, &mut tokens);
            }
        }

        tokens
    }
}

/// Split a whitespace chunk at clause separators, keeping each separator as its own piece
fn split_clauses(chunk: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut chars = chunk.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let splits = match c {
            ';' => true,
            ',' | ':' => !chars.peek().map_or(false, |(_, next)| next.is_ascii_digit()),
            _ => false,
        };
        if splits {
            if start < i {
                pieces.push(&chunk[start..i]);
            }
            pieces.push(&chunk[i..i + c.len_utf8()]);
            start = i + c.len_utf8();
        }
    }
    if start < chunk.len() {
        pieces.push(&chunk[start..]);
    }

    pieces
}

fn push_word(piece: &str, tokens: &mut Vec<String>) {
    let graphemes: Vec<&str> = piece.graphemes(true).collect();

    // Pure punctuation runs ("...", "--") stay whole
    if !graphemes.iter().any(|g| is_word_grapheme(g)) {
        tokens.push(piece.to_string());
        return;
    }

    let mut start = 0;
    while start < graphemes.len()
        && is_leading_punctuation(graphemes[start], graphemes.get(start + 1))
    {
        tokens.push(graphemes[start].to_string());
        start += 1;
    }

    let mut end = graphemes.len();
    let mut trailing = Vec::new();
    while end > start && is_trailing_punctuation(graphemes[end - 1]) {
        trailing.push(graphemes[end - 1].to_string());
        end -= 1;
    }

    let core: String = graphemes[start..end].concat();
    split_contraction(&core, tokens);

    tokens.extend(trailing.into_iter().rev());
}

/// Lowercases text and applies the ordered rewrite table
#[derive(Debug, Clone)]
pub struct Normalizer {
    rewrites: Vec<(String, String)>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::with_rewrites(DEFAULT_REWRITES.iter().map(|(p, r)| (p.to_string(), r.to_string())))
    }

    /// Build with a custom table; patterns and replacements are lowercased
    /// so rewritten text stays lowercase
    pub fn with_rewrites<I>(rewrites: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let rewrites = rewrites
            .into_iter()
            .filter(|(pattern, _)| !pattern.is_empty())
            .map(|(pattern, replacement)| (pattern.to_lowercase(), replacement.to_lowercase()))
            .collect();
        Self { rewrites }
    }

    pub fn normalize(&self, text: &str) -> String {
        let mut normalized = text.to_lowercase();
        for (pattern, replacement) in &self.rewrites {
            if normalized.contains(pattern.as_str()) {
                normalized = normalized.replace(pattern.as_str(), replacement);
            }
        }
        normalized
    }

    pub fn rewrites(&self) -> &[(String, String)] {
        &self.rewrites
    }
}

/// Normalizer and tokenizer composed into the pipeline's first stage
pub struct TextProcessor {
    normalizer: Normalizer,
    tokenizer: Box<dyn Tokenizer>,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        Self::with_tokenizer(Normalizer::new(), Box::new(WordTokenizer))
    }

    pub fn with_tokenizer(normalizer: Normalizer, tokenizer: Box<dyn Tokenizer>) -> Self {
        Self { normalizer, tokenizer }
    }

    /// Lowercase, rewrite, then split into word tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = self.normalizer.normalize(text);
        self.tokenizer.tokenize(&normalized)
    }
}

fn is_word_grapheme(grapheme: &str) -> bool {
    grapheme.chars().next().map_or(false, |c| c.is_alphanumeric())
}

fn is_leading_punctuation(grapheme: &str, next: Option<&&str>) -> bool {
    if is_word_grapheme(grapheme) {
        return false;
    }
    // ".net" keeps its dot
    !(grapheme == "." && next.map_or(false, |g| is_word_grapheme(g)))
}

fn is_trailing_punctuation(grapheme: &str) -> bool {
    // "c++" and "c#" keep their suffix
    !is_word_grapheme(grapheme) && grapheme != "+" && grapheme != "#"
}

fn split_contraction(word: &str, tokens: &mut Vec<String>) {
    if word.is_empty() {
        return;
    }
    for suffix in CONTRACTIONS {
        if word.len() > suffix.len() && word.ends_with(suffix) {
            let stem = &word[..word.len() - suffix.len()];
            tokens.push(stem.to_string());
            tokens.push(suffix.to_string());
            return;
        }
    }
    tokens.push(word.to_string());
}
