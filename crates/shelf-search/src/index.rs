//! Static search index format and query engine.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Index format version written by [`SearchIndexBuilder`](crate::SearchIndexBuilder).
pub const INDEX_VERSION: u32 = 1;

/// Score added per query token matching a title word.
const TITLE_BOOST: f32 = 3.0;
/// Score added per query token matching a body word.
const BODY_SCORE: f32 = 1.0;

static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}_]+(?:[-.][\p{L}\p{N}_]+)*").expect("invalid word regex")
});

/// Split text into lowercase words, deduplicated in first-seen order.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    WORD_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// Indexed page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub url: String,
    pub title: String,
    /// Short text shown under the result title.
    pub excerpt: String,
    title_tokens: Vec<String>,
    tokens: Vec<String>,
}

impl SearchDocument {
    pub(crate) fn new(url: String, title: String, excerpt: String, text: &str) -> Self {
        let title_tokens = tokenize(&title);
        let tokens = tokenize(text);
        Self {
            url,
            title,
            excerpt,
            title_tokens,
            tokens,
        }
    }

    fn words(&self) -> impl Iterator<Item = &str> {
        self.title_tokens
            .iter()
            .chain(&self.tokens)
            .map(String::as_str)
    }

    fn score(&self, terms: &[String]) -> f32 {
        terms
            .iter()
            .map(|term| {
                let mut score = 0.0;
                if self.title_tokens.iter().any(|t| t.starts_with(term.as_str())) {
                    score += TITLE_BOOST;
                }
                if self.tokens.iter().any(|t| t.starts_with(term.as_str())) {
                    score += BODY_SCORE;
                }
                score
            })
            .sum()
    }

    /// Whether every term is a substring of some title or body word.
    fn contains_all(&self, terms: &[String]) -> bool {
        terms
            .iter()
            .all(|term| self.words().any(|word| word.contains(term.as_str())))
    }
}

/// Search hit returned by [`SearchIndex::query`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub excerpt: String,
    pub score: f32,
}

/// Prebuilt search index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchIndex {
    version: u32,
    documents: Vec<SearchDocument>,
}

impl SearchIndex {
    pub(crate) fn new(documents: Vec<SearchDocument>) -> Self {
        Self {
            version: INDEX_VERSION,
            documents,
        }
    }

    /// Read an index from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SearchError> {
        let json = std::fs::read_to_string(path).map_err(|source| SearchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse an index from JSON.
    pub fn from_json(json: &str) -> Result<Self, SearchError> {
        let index: Self = serde_json::from_str(json)?;
        if index.version != INDEX_VERSION {
            return Err(SearchError::Version {
                found: index.version,
                expected: INDEX_VERSION,
            });
        }
        Ok(index)
    }

    /// Write the index as JSON, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), SearchError> {
        let io_err = |source| SearchError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, serde_json::to_vec(self)?).map_err(io_err)
    }

    #[must_use]
    pub fn documents(&self) -> &[SearchDocument] {
        &self.documents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Prefix-match query tokens against document words.
    ///
    /// A document scores for every query token that prefixes one of its
    /// words, with title words weighted higher. Results are ordered by score
    /// (ties keep index order) and truncated to `limit`.
    #[must_use]
    pub fn query(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        self.ranked(&tokenize(query), limit, |_| true)
    }

    /// Like [`SearchIndex::query`], but only keeps documents where every
    /// query token is a substring of some title or body word.
    ///
    /// The filter runs before truncation, so partial matches never crowd
    /// full matches out of the `limit` window.
    #[must_use]
    pub fn query_all_terms(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let terms = tokenize(query);
        self.ranked(&terms, limit, |doc| doc.contains_all(&terms))
    }

    fn ranked<F>(&self, terms: &[String], limit: usize, keep: F) -> Vec<SearchHit>
    where
        F: Fn(&SearchDocument) -> bool,
    {
        if terms.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = self
            .documents
            .iter()
            .filter(|doc| keep(doc))
            .filter_map(|doc| {
                let score = doc.score(terms);
                (score > 0.0).then(|| SearchHit {
                    url: doc.url.clone(),
                    title: doc.title.clone(),
                    excerpt: doc.excerpt.clone(),
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);
        hits
    }
}
