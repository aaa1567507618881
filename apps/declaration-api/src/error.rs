//! Error types for the Declaration API

use assembly_engine::{EngineError, ValidationError};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use declaration_types::DocumentError;
use render_engine::RenderError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Document(DocumentError),

    #[error("Rendering timed out after {0}ms")]
    RenderTimeout(u64),

    #[error(transparent)]
    Render(RenderError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        ApiError::Document(err)
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(e) => ApiError::Validation(e),
            EngineError::Document(e) => ApiError::Document(e),
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Timeout(ms) => ApiError::RenderTimeout(ms),
            RenderError::InvalidInput(msg) | RenderError::UnsupportedFormat(msg) => {
                ApiError::InvalidRequest(msg)
            }
            other => ApiError::Render(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge;
        }
        ApiError::InvalidRequest(rejection.body_text())
    }
}

/// Errors caused by the document's status rather than its content
fn is_lifecycle(err: &DocumentError) -> bool {
    matches!(
        err,
        DocumentError::IllegalTransition { .. } | DocumentError::NotEditable(_)
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Payload too large".to_string(),
            ),
            ApiError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            ApiError::Document(e) if is_lifecycle(e) => (StatusCode::CONFLICT, e.to_string()),
            ApiError::Document(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::RenderTimeout(ms) => (
                StatusCode::GATEWAY_TIMEOUT,
                format!("Rendering timed out after {}ms", ms),
            ),
            ApiError::Render(e) => {
                tracing::error!("Render error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Rendering failed".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let mut body = json!({
            "error": message,
            "status": status.as_u16(),
        });
        if let ApiError::Validation(e) = &self {
            body["errors"] = json!(e.violations);
        }

        (status, Json(body)).into_response()
    }
}
