//! HTTP API server for Shelf.
//!
//! Serves the documentation API consumed by the frontend and the CMS editor:
//! - Pages, navigation and search for readers
//! - Versioning, document pass-through and custom fields for editors
//! - API reference extracted from OpenAPI/Swagger files
//! - Static files (media, search index, frontend) from the public directory
//!
//! CMS and filesystem work is blocking and runs through `spawn_blocking`.
//!
//! # Architecture
//!
//! ```text
//! Browser / CMS editor ──HTTP──► axum router (shelf-server)
//!                                    │
//!                                    ├─► /api/* handlers ──► Site ──► CMS GraphQL
//!                                    │                    ├─► SearchClient
//!                                    │                    └─► SpecLibrary
//!                                    │
//!                                    └─► ServeDir(public dir)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use shelf_cms::{CmsClient, ContentBackend, VersionConfig};
use shelf_config::Config;
use shelf_fields::{MediaProbe, ThemeSelector};
use shelf_openapi::SpecLibrary;
use shelf_search::SearchClient;
use shelf_site::{Site, SiteOptions};

pub use app::create_router;
pub use error::ServerError;
pub use state::AppState;

/// Runtime options that do not come from `shelf.toml`.
#[derive(Clone, Debug, Default)]
pub struct ServeOptions {
    /// Application version (for `ETag`s).
    pub version: String,
    /// Log page render warnings.
    pub verbose: bool,
}

/// Build application state from configuration.
///
/// # Errors
///
/// Returns an error if the CMS endpoint for the selected environment is
/// missing or the theme configuration is inconsistent.
pub fn state_from_config(
    config: &Config,
    options: &ServeOptions,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let endpoint = config.require_cms()?;
    let backend: Arc<dyn ContentBackend> = Arc::new(CmsClient::from_endpoint(&endpoint));
    let site = Arc::new(Site::new(backend, SiteOptions::from_config(config)));

    let search = SearchClient::from_path(
        config.search_resolved.index_path.clone(),
        config.search_resolved.max_results,
    );
    let probe = Arc::new(
        MediaProbe::new(
            config.site_resolved.public_dir.clone(),
            config.site_resolved.media_base_url.clone(),
        )
        .with_allowed_origins(&config.site_resolved.media_origins),
    );

    Ok(AppState::new(
        site,
        search,
        VersionConfig::from_config(config),
        probe,
        ThemeSelector::from_config(config)?,
        SpecLibrary::new(config.reference_resolved.specs_dir.clone()),
    )
    .with_version(options.version.clone())
    .with_verbose(options.verbose))
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the state cannot be built or the server fails to
/// start.
pub async fn run_server(
    config: &Config,
    options: &ServeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(state_from_config(config, options)?);
    let app = create_router(state, &config.site_resolved.public_dir);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.server.host, config.server.port))?;
    tracing::info!(address = %addr, environment = %config.cms.environment, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
