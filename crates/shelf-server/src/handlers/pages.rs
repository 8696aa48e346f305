//! Pages API endpoint.
//!
//! Returns the assembled page (metadata, breadcrumbs, table of contents,
//! navigation, neighbors and HTML) with an `ETag`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use md5::{Digest, Md5};

use crate::error::ServerError;
use crate::handlers::to_url_path;
use crate::state::{AppState, blocking};

/// Handle GET /api/pages/ (site root).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    page_response(String::from("/"), state, headers).await
}

/// Handle GET /api/pages/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    page_response(to_url_path(&path), state, headers).await
}

async fn page_response(
    path: String,
    state: Arc<AppState>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let site = Arc::clone(&state.site);
    let page = blocking(move || Ok(site.render_page(&path)?)).await?;

    if state.verbose {
        for warning in &page.warnings {
            tracing::warn!(path = %page.meta.path, %warning, "Page render warning");
        }
    }

    let etag = compute_etag(&state.version, &page.html);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        Json(page),
    )
        .into_response())
}

/// Compute `ETag` from version and content.
///
/// MD5 truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_etag_changes_with_content() {
        assert_ne!(compute_etag("1", "a"), compute_etag("1", "b"));
        assert_ne!(compute_etag("1", "a"), compute_etag("2", "a"));
    }

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag("1.0.0", "content");

        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert_eq!(etag.len(), 18);
    }
}
