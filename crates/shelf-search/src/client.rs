//! Lazily loaded search client with strict result filtering.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use serde::Serialize;

use crate::error::SearchError;
use crate::index::{SearchHit, SearchIndex};

type Loader = Box<dyn Fn() -> Result<SearchIndex, SearchError> + Send + Sync>;

/// Outcome of a search.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SearchOutcome {
    /// Blank query; nothing was searched.
    Idle,
    /// The query matched nothing (or the index is unavailable).
    NoResults { query: String },
    Results { query: String, hits: Vec<SearchHit> },
}

impl SearchOutcome {
    /// Hits, empty unless [`SearchOutcome::Results`].
    #[must_use]
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            Self::Results { hits, .. } => hits,
            Self::Idle | Self::NoResults { .. } => &[],
        }
    }
}

/// Search client over a prebuilt index.
///
/// The index is loaded on the first non-blank query. A failed load is logged
/// and that query reports no results; the next query tries again.
///
/// # Thread Safety
///
/// The loaded index is kept as an `Arc<SearchIndex>` snapshot behind a
/// `RwLock`; loads are serialized by a `Mutex`.
pub struct SearchClient {
    loader: Loader,
    max_results: usize,
    load_lock: Mutex<()>,
    index: RwLock<Option<Arc<SearchIndex>>>,
}

impl SearchClient {
    /// Client reading the index from a JSON file.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>, max_results: usize) -> Self {
        let path = path.into();
        Self::with_loader(move || SearchIndex::load(&path), max_results)
    }

    /// Client using a custom index loader.
    #[must_use]
    pub fn with_loader<F>(loader: F, max_results: usize) -> Self
    where
        F: Fn() -> Result<SearchIndex, SearchError> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            max_results,
            load_lock: Mutex::new(()),
            index: RwLock::new(None),
        }
    }

    /// Run a query.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Idle;
        }

        let Some(index) = self.index() else {
            return SearchOutcome::NoResults {
                query: query.to_owned(),
            };
        };

        let hits = index.query_all_terms(query, self.max_results);

        tracing::debug!(query, hits = hits.len(), "Search");
        if hits.is_empty() {
            SearchOutcome::NoResults {
                query: query.to_owned(),
            }
        } else {
            SearchOutcome::Results {
                query: query.to_owned(),
                hits,
            }
        }
    }

    /// Drop the loaded index; the next query reloads it.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub fn invalidate(&self) {
        *self.index.write().unwrap() = None;
    }

    /// Whether an index is currently loaded.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.index.read().unwrap().is_some()
    }

    fn index(&self) -> Option<Arc<SearchIndex>> {
        if let Some(index) = self.index.read().unwrap().clone() {
            return Some(index);
        }

        let _guard = self.load_lock.lock().unwrap();
        if let Some(index) = self.index.read().unwrap().clone() {
            return Some(index);
        }

        match (self.loader)() {
            Ok(index) => {
                tracing::info!(documents = index.len(), "Search index loaded");
                let index = Arc::new(index);
                *self.index.write().unwrap() = Some(Arc::clone(&index));
                Some(index)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load search index");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::SearchIndexBuilder;

    fn sample_index() -> SearchIndex {
        let mut builder = SearchIndexBuilder::new();
        builder
            .add_page("/docs/install", "Installation", "Download the binary and run it.")
            .add_page("/docs/config", "Configuration", "Install plugins through the config file.");
        builder.build()
    }

    fn client() -> SearchClient {
        SearchClient::with_loader(|| Ok(sample_index()), 20)
    }

    #[test]
    fn test_blank_query_is_idle() {
        let client = client();

        assert_eq!(client.search("   "), SearchOutcome::Idle);
        assert!(!client.is_loaded());
    }

    #[test]
    fn test_no_matching_documents_gives_no_results() {
        let outcome = client().search("kubernetes");

        assert_eq!(
            outcome,
            SearchOutcome::NoResults {
                query: "kubernetes".to_owned()
            }
        );
        assert!(outcome.hits().is_empty());
    }

    #[test]
    fn test_strict_filter_requires_every_term() {
        let client = client();

        let both = client.search("install plugins");
        let urls: Vec<_> = both.hits().iter().map(|h| h.url.as_str()).collect();
        assert_eq!(urls, ["/docs/config"]);

        let single = client.search("install");
        assert_eq!(single.hits().len(), 2);
    }

    #[test]
    fn test_partial_matches_do_not_crowd_out_full_match() {
        let client = SearchClient::with_loader(|| Ok(sample_index()), 1);

        let outcome = client.search("install plugins");

        let urls: Vec<_> = outcome.hits().iter().map(|h| h.url.as_str()).collect();
        assert_eq!(urls, ["/docs/config"]);
    }

    #[test]
    fn test_load_failure_returns_no_results_and_retries() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let client = SearchClient::with_loader(
            move || {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(SearchError::Version {
                        found: 0,
                        expected: 1,
                    })
                } else {
                    Ok(sample_index())
                }
            },
            20,
        );

        assert!(matches!(client.search("install"), SearchOutcome::NoResults { .. }));
        assert!(matches!(client.search("install"), SearchOutcome::Results { .. }));
        client.search("config");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let client = SearchClient::from_path(dir.path().join("missing.json"), 20);

        assert!(matches!(client.search("x"), SearchOutcome::NoResults { .. }));
        assert!(!client.is_loaded());
    }

    #[test]
    fn test_invalidate_reloads() {
        let client = client();
        client.search("install");
        assert!(client.is_loaded());

        client.invalidate();

        assert!(!client.is_loaded());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(SearchOutcome::NoResults {
            query: "x".to_owned(),
        })
        .unwrap();

        assert_eq!(json, serde_json::json!({"state": "noResults", "query": "x"}));
    }
}
