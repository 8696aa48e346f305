//! CLI error types.

use shelf_cms::{CmsError, VersionError};
use shelf_config::ConfigError;
use shelf_openapi::OpenApiError;
use shelf_search::SearchError;
use shelf_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Cms(#[from] CmsError),

    #[error("{0}")]
    Version(#[from] VersionError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Search(#[from] SearchError),

    #[error("{0}")]
    Reference(#[from] OpenApiError),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Validation(String),
}
