//! Error types for custom fields.

use std::path::PathBuf;

/// Error from a custom field operation.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// Image source cannot be probed (unsupported scheme, path escape).
    #[error("Unsupported image source '{0}'")]
    UnsupportedSource(String),

    /// Local media file could not be read.
    #[error("Cannot read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Image data could not be decoded.
    #[error("Cannot decode image: {0}")]
    Image(#[from] image::ImageError),

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error fetching image: {status}")]
    HttpResponse { status: u16 },

    /// Selected theme is not configured.
    #[error("Unknown theme '{0}'")]
    UnknownTheme(String),
}
