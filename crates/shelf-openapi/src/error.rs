//! Error types for API reference parsing.

use std::path::PathBuf;

/// Error from loading or parsing an API description.
#[derive(Debug, thiserror::Error)]
pub enum OpenApiError {
    /// File could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Document is neither OpenAPI 3.x nor Swagger 2.0.
    #[error("Unsupported API description version: {0}")]
    UnsupportedVersion(String),

    /// `$ref` points outside the document or at a missing node.
    #[error("Unresolved reference '{0}'")]
    UnresolvedRef(String),

    /// `$ref` chain refers back to itself.
    #[error("Cyclic reference '{0}'")]
    CyclicRef(String),

    /// Named spec does not exist in the specs directory.
    #[error("API reference '{0}' not found")]
    NotFound(String),

    /// Spec name contains characters that are not allowed.
    #[error("Invalid API reference name '{0}'")]
    InvalidName(String),
}
