// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Validation failed")]
    ValidationFailure(#[from] ValidationErrors),

    #[error("{0}")]
    InternalServerError(String),
}

/// クライアントに返すエラーレスポンス（{"error": "..."} 形式）
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::DbErr(db_err) => {
                // サーバーログには詳細を出す
                tracing::error!("Database error: {:?}", db_err);

                let status = match db_err {
                    DbErr::RecordNotFound(_) => StatusCode::NOT_FOUND,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                let message = match status {
                    StatusCode::NOT_FOUND => "The requested resource was not found".to_string(),
                    _ => "Internal server error".to_string(),
                };
                (status, message)
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Conflict(message) => (StatusCode::CONFLICT, message),
            AppError::ValidationFailure(errors) => {
                // フィールドエラーの先頭メッセージをそのまま返す
                let message = errors
                    .field_errors()
                    .into_values()
                    .flatten()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .next()
                    .unwrap_or_else(|| "Validation failed".to_string());
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::InternalServerError(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!("Responding with {} error: {}", status.as_u16(), message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
