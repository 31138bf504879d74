use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::profiles::items::ItemError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Precondition failures checked locally before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network, auth or quota failures from the generation service.
    #[error("Generation failed: {0}")]
    Llm(String),

    /// The generation service answered, but not with anything we could parse.
    #[error("Generation failed: {0}")]
    LlmResponse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Failures from the flat-file stores (profiles, history, settings).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("index {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::NotFound(format!("{what} not found")),
            StoreError::InvalidName(msg) => AppError::Validation(msg),
            e @ StoreError::IndexOutOfRange { .. } => AppError::NotFound(e.to_string()),
            e => AppError::Storage(e.to_string()),
        }
    }
}

impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            e @ ItemError::Invalid { .. } => AppError::Validation(e.to_string()),
            e @ ItemError::OutOfRange { .. } => AppError::NotFound(e.to_string()),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => AppError::Validation(
                "API key not configured. Set it under settings before generating.".to_string(),
            ),
            e @ (LlmError::UnparsableResponse { .. } | LlmError::ResponseShape { .. }) => {
                AppError::LlmResponse(e.to_string())
            }
            e => AppError::Llm(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    format!("Generation failed: {msg}"),
                )
            }
            AppError::LlmResponse(msg) => {
                tracing::error!("LLM response error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_RESPONSE_ERROR",
                    format!("Generation failed: {msg}"),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Failed to read or write local data".to_string(),
                )
            }
            AppError::Export(msg) => {
                tracing::error!("Export error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "Failed to render the document".to_string(),
                )
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_a_validation_error() {
        let err: AppError = LlmError::MissingApiKey.into();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_unparsable_response_keeps_excerpt() {
        let err: AppError = LlmError::UnparsableResponse {
            excerpt: "Sorry, I cannot".to_string(),
        }
        .into();
        match err {
            AppError::LlmResponse(msg) => assert!(msg.contains("Sorry, I cannot")),
            other => panic!("expected LlmResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err: AppError = StoreError::NotFound("Profile 'ghost'".to_string()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_error_maps_to_bad_gateway() {
        let err: AppError = LlmError::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
