//! Versioning API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use shelf_cms::{VersionCreator, VersionRecord};

use crate::error::ServerError;
use crate::state::{AppState, blocking};

/// Response for GET /api/versions.
#[derive(Serialize)]
pub(crate) struct VersionsResponse {
    versions: Vec<VersionRecord>,
}

/// Request for POST /api/versions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateVersionRequest {
    #[serde(flatten)]
    record: VersionRecord,
    #[serde(default)]
    dry_run: bool,
}

/// Handle GET /api/versions.
pub(crate) async fn list_versions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VersionsResponse>, ServerError> {
    let versions = blocking(move || {
        let creator = VersionCreator::new(state.site.backend(), state.versions.clone());
        Ok(creator.list_versions()?)
    })
    .await?;
    Ok(Json(VersionsResponse { versions }))
}

/// Handle POST /api/versions.
///
/// Runs the whole snapshot synchronously. Responds 201 with the copy report,
/// 200 with the plan for a dry run, 400 for an invalid number and 409 if the
/// version exists.
pub(crate) async fn create_version(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateVersionRequest>,
) -> Result<Response, ServerError> {
    blocking(move || {
        let creator = VersionCreator::new(state.site.backend(), state.versions.clone());
        if request.dry_run {
            let plan = creator.dry_run(&request.record)?;
            return Ok(Json(plan).into_response());
        }

        let result = creator.create(&request.record)?;
        state.site.invalidate();
        if !result.is_complete() {
            tracing::warn!(
                version = %result.version.version_number,
                failed = result.failed.len(),
                "Version created with failed documents"
            );
        }
        Ok((StatusCode::CREATED, Json(result)).into_response())
    })
    .await
}
