//! 统一错误处理
//!
//! | 变体 | HTTP | `error` 字段 |
//! |------|------|--------------|
//! | Validation | 400 | `Invalid payload` |
//! | NotFound | 404 | `Not found` |
//! | Storage | 500 | `Internal server error` |
//!
//! ```json
//! { "error": "Invalid payload", "message": "name must not be empty" }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::ModelError;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Storage error: {0}")]
    /// Document read/write failure (500)
    Storage(#[from] StoreError),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "Invalid payload", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", msg),
            AppError::Storage(err) => {
                error!(target: "storage", error = %err, "Document store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "Storage error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: kind, message })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Handler result
pub type AppResult<T> = Result<T, AppError>;
