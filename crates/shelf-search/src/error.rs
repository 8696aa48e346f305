//! Search error types.

use std::path::PathBuf;

/// Error loading or writing a search index.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Index file could not be read or written.
    #[error("Search index I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Index file is not valid JSON for the index format.
    #[error("Invalid search index: {0}")]
    Json(#[from] serde_json::Error),
    /// Index was written by an incompatible version.
    #[error("Unsupported search index version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
}
