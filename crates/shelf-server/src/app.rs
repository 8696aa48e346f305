//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// Requests outside `/api` are served from `public_dir` (media, search
/// index and frontend assets).
pub fn create_router(state: Arc<AppState>, public_dir: &Path) -> Router {
    let api_routes = Router::new()
        .route("/api/pages/", get(handlers::pages::get_root_page))
        .route("/api/pages/{*path}", get(handlers::pages::get_page))
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route("/api/search", get(handlers::search::search))
        .route(
            "/api/versions",
            get(handlers::versions::list_versions).post(handlers::versions::create_version),
        )
        .route(
            "/api/documents",
            post(handlers::documents::create_document).put(handlers::documents::update_document),
        )
        .route("/api/fields/image", post(handlers::fields::update_image))
        .route("/api/fields/themes", get(handlers::fields::list_themes))
        .route("/api/reference", get(handlers::reference::list_references))
        .route("/api/reference/{name}", get(handlers::reference::get_reference))
        .route("/api/cache/invalidate", post(handlers::cache::invalidate));

    Router::new()
        .merge(api_routes)
        .fallback_service(ServeDir::new(public_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
