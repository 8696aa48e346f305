//! Custom field endpoints for the CMS editor.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use shelf_fields::{ImageField, Theme};

use crate::error::ServerError;
use crate::state::{AppState, blocking};

/// Request for POST /api/fields/image.
///
/// `src` replaces the field's source; a missing or empty `src` clears it.
#[derive(Debug, Deserialize)]
pub(crate) struct ImageFieldRequest {
    #[serde(default)]
    field: ImageField,
    #[serde(default)]
    src: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageFieldResponse {
    field: ImageField,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

/// Handle POST /api/fields/image.
pub(crate) async fn update_image(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ImageFieldRequest>,
) -> Result<Json<ImageFieldResponse>, ServerError> {
    let ImageFieldRequest { mut field, src } = request;
    let response = blocking(move || {
        let warning = match src.as_deref() {
            Some(src) => field.set_src(src, state.probe.as_ref()),
            None => {
                field.clear();
                None
            }
        };
        Ok(ImageFieldResponse { field, warning })
    })
    .await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThemesQuery {
    #[serde(default)]
    selected: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ThemesResponse {
    default: String,
    selected: Theme,
    options: Vec<Theme>,
}

/// Handle GET /api/fields/themes.
pub(crate) async fn list_themes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ThemesQuery>,
) -> Result<Json<ThemesResponse>, ServerError> {
    let themes = &state.themes;
    let selected = themes.select(query.selected.as_deref())?.clone();
    Ok(Json(ThemesResponse {
        default: themes.default_name().to_owned(),
        selected,
        options: themes.options().to_vec(),
    }))
}
