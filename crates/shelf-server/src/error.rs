//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use shelf_cms::{CmsError, VersionError};
use shelf_fields::FieldError;
use shelf_openapi::OpenApiError;
use shelf_site::SiteError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Request is malformed.
    #[error("{0}")]
    BadRequest(String),

    /// Page assembly failed.
    #[error(transparent)]
    Site(#[from] SiteError),

    /// CMS pass-through failed.
    #[error(transparent)]
    Cms(#[from] CmsError),

    /// Versioning workflow failed.
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Custom field operation failed.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// API reference could not be loaded.
    #[error(transparent)]
    Reference(#[from] OpenApiError),

    /// Blocking task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_)
            | Self::Version(VersionError::InvalidVersion { .. })
            | Self::Field(FieldError::UnknownTheme(_) | FieldError::UnsupportedSource(_))
            | Self::Reference(OpenApiError::InvalidName(_)) => StatusCode::BAD_REQUEST,
            Self::Site(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Cms(CmsError::NotFound { .. }) | Self::Reference(OpenApiError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Version(VersionError::AlreadyExists { .. }) => StatusCode::CONFLICT,
            Self::Site(SiteError::Cms(_))
            | Self::Cms(_)
            | Self::Version(VersionError::Cms(_))
            | Self::Field(FieldError::HttpRequest(_) | FieldError::HttpResponse { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Field(FieldError::Io { .. } | FieldError::Image(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Site(_) | Self::Reference(_) | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, axum::Json(json!({"error": self.to_string()}))).into_response()
    }
}
