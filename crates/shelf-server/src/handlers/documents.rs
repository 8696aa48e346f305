//! Document pass-through endpoints for the CMS editor.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ServerError;
use crate::state::{AppState, blocking};

/// Body of POST and PUT /api/documents.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocumentRequest {
    collection: String,
    relative_path: String,
    #[serde(default)]
    values: Map<String, Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocumentResponse {
    collection: String,
    relative_path: String,
}

/// Handle POST /api/documents.
pub(crate) async fn create_document(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), ServerError> {
    let response = write_document(state, request, Write::Create).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handle PUT /api/documents.
pub(crate) async fn update_document(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DocumentRequest>,
) -> Result<Json<DocumentResponse>, ServerError> {
    Ok(Json(write_document(state, request, Write::Update).await?))
}

#[derive(Clone, Copy)]
enum Write {
    Create,
    Update,
}

async fn write_document(
    state: Arc<AppState>,
    request: DocumentRequest,
    write: Write,
) -> Result<DocumentResponse, ServerError> {
    let collection = request.collection.trim();
    let relative_path = request.relative_path.trim();
    if collection.is_empty() || relative_path.is_empty() {
        return Err(ServerError::BadRequest(
            "collection and relativePath are required".to_owned(),
        ));
    }
    if relative_path.split('/').any(|s| s == ".." || s.is_empty()) {
        return Err(ServerError::BadRequest(format!(
            "Invalid relativePath '{relative_path}'"
        )));
    }

    let response = DocumentResponse {
        collection: collection.to_owned(),
        relative_path: relative_path.to_owned(),
    };
    let (collection, relative_path) = (response.collection.clone(), response.relative_path.clone());

    blocking(move || {
        let backend = state.site.backend();
        match write {
            Write::Create => backend.create_document(&collection, &relative_path, &request.values)?,
            Write::Update => backend.update_document(&collection, &relative_path, &request.values)?,
        }
        if collection == state.site.options().toc_collection {
            state.site.invalidate();
        }
        Ok(())
    })
    .await?;

    Ok(response)
}
