//! Process-wide technical-term dictionary and stopword set
//!
//! Both tables are built once, either as the shared default or from a
//! [`VocabularyConfig`], and are read-only afterwards. Callers share them
//! through an `Arc`.

use crate::config::VocabularyConfig;
use log::warn;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Arc;

/// Canonical single- and two-word technical terms.
///
/// Aliases such as "node.js" are folded into their canonical form
/// ("nodejs") by the normalizer's rewrite table before lookup.
const TECHNICAL_TERMS: &[&str] = &[
    // Languages
    "python", "java", "javascript", "typescript", "ruby", "php", "golang", "rust",
    "kotlin", "swift", "scala", "perl", "haskell", "elixir", "clojure", "c++",
    "sql", "nosql", "html", "css", "sass", "bash", "powershell", "matlab",
    // Web frameworks and runtimes
    "react", "angular", "angularjs", "vue", "vuejs", "svelte", "nodejs", "expressjs",
    "nextjs", "nuxtjs", "django", "flask", "fastapi", "spring", "rails", "laravel",
    "jquery", "redux", "webpack", "bootstrap", "tailwind", "graphql", "rest", "api",
    "apis", "microservices", "frontend", "backend",
    // Infrastructure and delivery
    "docker", "kubernetes", "k8s", "terraform", "ansible", "jenkins", "circleci",
    "travis", "aws", "azure", "gcp", "git", "github", "gitlab", "linux", "unix",
    "nginx", "serverless", "devops", "cicd", "helm", "prometheus", "grafana",
    // Data stores and streaming
    "mongodb", "postgresql", "postgres", "mysql", "sqlite", "redis", "elasticsearch",
    "cassandra", "dynamodb", "kafka", "rabbitmq", "snowflake",
    // Data and ML
    "pandas", "numpy", "tensorflow", "pytorch", "keras", "spark", "hadoop",
    "airflow", "tableau", "excel",
    // Process and tooling
    "agile", "scrum", "kanban", "jira", "figma",
    // Two-word terms
    "machine learning", "deep learning", "data science", "data analysis",
    "data engineering", "computer vision", "natural language", "big data",
    "software engineer", "software engineering", "senior developer", "full stack",
    "project management", "product management", "unit testing", "test automation",
    "sql server", "google cloud", "github actions", "spring boot", "react native",
    "power bi", "version control", "cloud computing", "distributed systems",
    "continuous integration", "continuous delivery", "web development",
];

/// Smaller allow-list used by the important-terms view
const IMPORTANT_TERMS: &[&str] = &[
    "python", "java", "javascript", "typescript", "sql", "html", "css", "react",
    "angular", "vue", "nodejs", "django", "flask", "docker", "kubernetes", "aws",
    "azure", "gcp", "git", "linux", "mongodb", "postgresql", "mysql", "redis",
    "graphql", "rest", "api", "microservices", "devops", "jenkins", "terraform",
];

/// Job-posting filler that carries no skill signal
const DOMAIN_STOPWORDS: &[&str] = &[
    "experience", "experienced", "skills", "skill", "job", "looking", "work",
    "working", "years", "year", "team", "required", "requirements", "preferred",
    "ability", "strong", "knowledge", "candidate", "position", "role", "company",
    "responsibilities", "including", "plus", "must", "etc",
];

/// NLTK English stopword list
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below",
    "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "don't", "should", "should've", "now", "d", "ll", "m", "o",
    "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't",
    "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't",
    "shan", "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't",
    "won", "won't", "wouldn", "wouldn't",
];

/// Supplies the base language stopword list
pub trait StopwordProvider: Send + Sync {
    fn stopwords(&self) -> Vec<String>;
}

/// English stopwords, matching the NLTK corpus list
#[derive(Debug, Clone, Default)]
pub struct EnglishStopwords;

impl StopwordProvider for EnglishStopwords {
    fn stopwords(&self) -> Vec<String> {
        ENGLISH_STOPWORDS.iter().map(|s| s.to_string()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct TechnicalTermDictionary {
    single_word: HashSet<String>,
    two_word: HashSet<String>,
}

impl TechnicalTermDictionary {
    /// Sort terms into single- and two-word tables; longer phrases are dropped
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut single_word = HashSet::new();
        let mut two_word = HashSet::new();

        for term in terms {
            let words: Vec<String> = term
                .as_ref()
                .split_whitespace()
                .map(|w| w.to_lowercase())
                .collect();

            match words.len() {
                0 => {}
                1 => {
                    single_word.insert(words[0].clone());
                }
                2 => {
                    two_word.insert(words.join(" "));
                }
                n => warn!("Ignoring {}-word technical term '{}'", n, term.as_ref()),
            }
        }

        Self { single_word, two_word }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.single_word.contains(term)
    }

    pub fn contains_pair(&self, first: &str, second: &str) -> bool {
        if self.two_word.is_empty() {
            return false;
        }
        self.two_word.contains(&format!("{} {}", first, second))
    }

    pub fn len(&self) -> usize {
        self.single_word.len() + self.two_word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Language stopwords unioned with domain filler and any configured extras
    pub fn new<S: AsRef<str>>(provider: &dyn StopwordProvider, extra: &[S]) -> Self {
        let words = provider
            .stopwords()
            .into_iter()
            .chain(DOMAIN_STOPWORDS.iter().map(|s| s.to_string()))
            .chain(extra.iter().map(|s| s.as_ref().to_string()))
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Every read-only table keyword extraction consults
#[derive(Debug, Clone)]
pub struct Vocabulary {
    technical_terms: TechnicalTermDictionary,
    important_terms: HashSet<String>,
    stopwords: StopwordSet,
}

static DEFAULT_VOCABULARY: Lazy<Arc<Vocabulary>> =
    Lazy::new(|| Arc::new(Vocabulary::with_config(&VocabularyConfig::default())));

impl Vocabulary {
    /// Shared default vocabulary, built on first use
    pub fn shared() -> Arc<Vocabulary> {
        Arc::clone(&DEFAULT_VOCABULARY)
    }

    pub fn with_config(config: &VocabularyConfig) -> Self {
        Self::with_provider(&EnglishStopwords, config)
    }

    pub fn with_provider(provider: &dyn StopwordProvider, config: &VocabularyConfig) -> Self {
        let technical_terms = TechnicalTermDictionary::from_terms(
            TECHNICAL_TERMS
                .iter()
                .map(|s| s.to_string())
                .chain(config.extra_technical_terms.iter().cloned()),
        );
        let important_terms = IMPORTANT_TERMS.iter().map(|s| s.to_string()).collect();
        let stopwords = StopwordSet::new(provider, &config.extra_stopwords);

        Self {
            technical_terms,
            important_terms,
            stopwords,
        }
    }

    pub fn technical_terms(&self) -> &TechnicalTermDictionary {
        &self.technical_terms
    }

    pub fn is_important_term(&self, term: &str) -> bool {
        self.important_terms.contains(term)
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }
}
