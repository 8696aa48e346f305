//! Error types for CMS access.

/// Error from CMS API operations.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// The GraphQL response carried errors.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Document does not exist.
    #[error("Document not found: {collection}/{relative_path}")]
    NotFound {
        collection: String,
        relative_path: String,
    },

    /// Response did not have the expected shape.
    #[error("Unexpected CMS response: {0}")]
    InvalidResponse(String),
}
