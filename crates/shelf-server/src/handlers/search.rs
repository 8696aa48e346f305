//! Search API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use shelf_search::SearchOutcome;

use crate::error::ServerError;
use crate::state::{AppState, blocking};

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Handle GET /api/search.
///
/// The index file is loaded on first use, so the query runs off the runtime.
pub(crate) async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchOutcome>, ServerError> {
    let outcome = blocking(move || Ok(state.search.search(&query.q))).await?;
    Ok(Json(outcome))
}
