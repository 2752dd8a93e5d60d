use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::editor::binder::BindError;
use crate::editor::lists::ListError;
use crate::export::ExportError;
use crate::photo::PhotoError;
use crate::share::ShareError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    PhotoRejected(#[from] PhotoError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Share(#[from] ShareError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<BindError> for AppError {
    fn from(e: BindError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<ListError> for AppError {
    fn from(e: ListError) -> Self {
        match e {
            ListError::NoEntryAt { .. } => AppError::NotFound(e.to_string()),
            ListError::UnknownField { .. } => AppError::Validation(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PhotoRejected(e) => {
                tracing::warn!("Photo rejected: {e:?}");
                let status = match e {
                    PhotoError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                    PhotoError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    PhotoError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, "PHOTO_REJECTED", e.to_string())
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_FAILED", e.to_string())
            }
            AppError::Share(e) => {
                tracing::error!("Share error: {e:?}");
                let status = match e {
                    ShareError::ClientUnavailable | ShareError::ConfigMissing => {
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                    ShareError::Http(_) | ShareError::Remote { .. } => StatusCode::BAD_GATEWAY,
                };
                (status, "SHARE_FAILED", e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
