//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use shelf_cms::VersionConfig;
use shelf_fields::{DimensionProbe, ThemeSelector};
use shelf_openapi::SpecLibrary;
use shelf_search::SearchClient;
use shelf_site::Site;

/// Application state shared across all handlers.
pub struct AppState {
    /// Page assembly and navigation cache.
    pub(crate) site: Arc<Site>,
    /// Static search index reader.
    pub(crate) search: SearchClient,
    /// Versioning workflow settings.
    pub(crate) versions: VersionConfig,
    /// Image dimension source for the image field.
    pub(crate) probe: Arc<dyn DimensionProbe>,
    /// Theme selector field.
    pub(crate) themes: ThemeSelector,
    /// API description files.
    pub(crate) specs: SpecLibrary,
    /// Application version for `ETag`s.
    pub(crate) version: String,
    /// Log render warnings.
    pub(crate) verbose: bool,
}

impl AppState {
    #[must_use]
    pub fn new(
        site: Arc<Site>,
        search: SearchClient,
        versions: VersionConfig,
        probe: Arc<dyn DimensionProbe>,
        themes: ThemeSelector,
        specs: SpecLibrary,
    ) -> Self {
        Self {
            site,
            search,
            versions,
            probe,
            themes,
            specs,
            version: String::new(),
            verbose: false,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Run a blocking closure (CMS, filesystem or image I/O) off the runtime.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, crate::error::ServerError>
where
    F: FnOnce() -> Result<T, crate::error::ServerError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}
