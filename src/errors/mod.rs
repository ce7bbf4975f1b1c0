//! Unified error handling with the JSON error body consumed by the web client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// User-facing message for a missing or invalid identity.
pub const MSG_AUTH_REQUIRED: &str = "認証が必要です";

/// User-facing message for any server-side failure.
pub const MSG_DATABASE_ERROR: &str = "データベース接続エラー";

/// Error body returned by every failing endpoint: `{ "error": "..." }`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            error: message.into(),
        })
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Unauthorized => MSG_AUTH_REQUIRED.to_string(),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                MSG_DATABASE_ERROR.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                MSG_DATABASE_ERROR.to_string()
            }
        };

        (status, ErrorBody::new(message)).into_response()
    }
}
