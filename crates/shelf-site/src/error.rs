//! Site error types.

use shelf_cms::CmsError;
use shelf_nav::NavError;

/// Error returned when assembling a page or index fails.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// No document backs the requested URL.
    #[error("Page not found: {0}")]
    PageNotFound(String),
    /// CMS request failed.
    #[error(transparent)]
    Cms(#[from] CmsError),
    /// Table-of-contents document is malformed.
    #[error("Invalid navigation: {0}")]
    Navigation(#[from] NavError),
    /// Document body is not a rich-text tree.
    #[error("Invalid document body in {path}: {source}")]
    Body {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SiteError {
    /// Whether the error means the page does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PageNotFound(_) | Self::Cms(CmsError::NotFound { .. }))
    }
}
