//! Error types for the versioning workflow.

use crate::error::CmsError;

/// Error creating a content version.
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// Version number cannot be used as a path segment.
    #[error("Invalid version number '{version}': {reason}")]
    InvalidVersion { version: String, reason: &'static str },

    /// A version record or versioned documents already exist.
    #[error("Version '{version}' already exists")]
    AlreadyExists { version: String },

    /// CMS API error.
    #[error("CMS API error: {0}")]
    Cms(#[from] CmsError),
}
