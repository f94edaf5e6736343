use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::db::StoreError;
use crate::models::TaskId;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("Storage error: {0}")]
    Storage(#[source] StoreError),

    /// No operation produces this yet; kept so field rules can be added
    /// without changing the transport mapping.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(id),
            other => AppError::Storage(other),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(id) => (StatusCode::NOT_FOUND, format!("Task not found with id: {}", id)),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Storage(e) => {
                error!("storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: error_message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_becomes_app_not_found() {
        let err = AppError::from(StoreError::NotFound(4));
        assert!(matches!(err, AppError::NotFound(4)));
    }

    #[test]
    fn other_store_failures_stay_opaque() {
        let err = AppError::from(StoreError::Unavailable("lock poisoned".to_string()));
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn status_codes_per_variant() {
        assert_eq!(AppError::NotFound(1).into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Validation("title too long".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }
}
