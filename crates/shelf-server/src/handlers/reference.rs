//! API reference endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ServerError;
use crate::state::{AppState, blocking};

#[derive(Serialize)]
pub(crate) struct ReferenceListResponse {
    names: Vec<String>,
}

/// Handle GET /api/reference.
pub(crate) async fn list_references(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReferenceListResponse>, ServerError> {
    let names = blocking(move || Ok(state.specs.names()?)).await?;
    Ok(Json(ReferenceListResponse { names }))
}

/// Handle GET /api/reference/{name}.
///
/// Returns the parsed description with its endpoints grouped by tag.
pub(crate) async fn get_reference(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ServerError> {
    let body = blocking(move || {
        let spec = state.specs.load(&name)?;
        let groups = spec.group_by_tag();
        Ok(json!({"spec": &spec, "groups": groups}))
    })
    .await?;
    Ok(Json(body))
}
