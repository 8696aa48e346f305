//! Cache invalidation endpoint, called by the CMS webhook.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Handle POST /api/cache/invalidate.
pub(crate) async fn invalidate(State(state): State<Arc<AppState>>) -> StatusCode {
    state.site.invalidate();
    state.search.invalidate();
    StatusCode::NO_CONTENT
}
