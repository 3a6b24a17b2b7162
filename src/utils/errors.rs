//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    ok: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        ok: false,
                        error: "An error occurred while accessing the database".to_string(),
                        details: None,
                    },
                )
            }

            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    ok: false,
                    error: msg,
                    details: None,
                },
            ),

            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    ok: false,
                    error: msg,
                    details: None,
                },
            ),

            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ErrorResponse {
                    ok: false,
                    error: msg,
                    details: None,
                },
            ),

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    ok: false,
                    error: msg,
                    details: None,
                },
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    ok: false,
                    error: msg,
                    details: None,
                },
            ),

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        ok: false,
                        error: "An unexpected error occurred".to_string(),
                        details: None,
                    },
                )
            }

            AppError::Jwt(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    ok: false,
                    error: msg,
                    details: None,
                },
            ),

            AppError::ExternalApi(msg) => {
                tracing::error!("External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        ok: false,
                        error: "An error occurred while communicating with external service"
                            .to_string(),
                        details: Some(json!({ "external_api_error": msg })),
                    },
                )
            }

            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        ok: false,
                        error: "An error occurred while accessing object storage".to_string(),
                        details: None,
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;
