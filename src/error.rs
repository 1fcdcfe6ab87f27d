use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::SqlErr;
use serde::Serialize;

use crate::config::ConfigError;

/// Machine-readable error codes, stable across releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    ObjectNotFound,
    #[serde(rename = "database_field_not_found")]
    FieldNotFound,
    ValidationError,
    Conflict,
    InvalidCredentials,
    #[serde(rename = "invalid_token")]
    InvalidToken,
    #[serde(rename = "expired_token")]
    TokenExpired,
    AuthorizationFailed,
    Unauthorized,
    ConfigurationError,
    #[serde(rename = "db_exception")]
    DatabaseError,
    UnexpectedError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ObjectNotFound => "object_not_found",
            ErrorCode::FieldNotFound => "database_field_not_found",
            ErrorCode::ValidationError => "validation_error",
            ErrorCode::Conflict => "conflict",
            ErrorCode::InvalidCredentials => "invalid_credentials",
            ErrorCode::InvalidToken => "invalid_token",
            ErrorCode::TokenExpired => "expired_token",
            ErrorCode::AuthorizationFailed => "authorization_failed",
            ErrorCode::Unauthorized => "unauthorized",
            ErrorCode::ConfigurationError => "configuration_error",
            ErrorCode::DatabaseError => "db_exception",
            ErrorCode::UnexpectedError => "unexpected_error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error type that can be returned from handlers
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token signature rejected")]
    AuthorizationFailed,

    #[error("Token expired")]
    TokenExpired,

    #[error("Unauthorized")]
    Unauthorized,

    // Resource errors
    #[error("{detail}")]
    NotFound { code: ErrorCode, detail: String },

    #[error("{0} already exists")]
    Conflict(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Startup errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// No row of `resource` matched the query
    pub fn object_not_found(resource: &str) -> Self {
        AppError::NotFound {
            code: ErrorCode::ObjectNotFound,
            detail: format!("{} not found", resource),
        }
    }

    /// The bound entity has no column called `field`
    pub fn field_not_found(resource: &str, field: &str) -> Self {
        AppError::NotFound {
            code: ErrorCode::FieldNotFound,
            detail: format!("{} has no field '{}'", resource, field),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::InvalidToken => ErrorCode::InvalidToken,
            AppError::AuthorizationFailed => ErrorCode::AuthorizationFailed,
            AppError::TokenExpired => ErrorCode::TokenExpired,
            AppError::Unauthorized => ErrorCode::Unauthorized,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict(_) => ErrorCode::Conflict,
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::Configuration(_) => ErrorCode::ConfigurationError,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::Internal(_) => ErrorCode::UnexpectedError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials
            | AppError::TokenExpired
            | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken | AppError::AuthorizationFailed => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_code: ErrorCode,
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failures are logged in full but never echoed to the client
        let detail = match &self {
            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            error_code: self.code(),
            detail,
        });

        (status, body).into_response()
    }
}

// Convenient conversions from common error types

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return AppError::Conflict(detail);
        }

        match err {
            sea_orm::DbErr::RecordNotFound(resource) => AppError::object_not_found(&resource),
            sea_orm::DbErr::RecordNotUpdated => AppError::object_not_found("Record"),
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::AuthorizationFailed,
            _ => AppError::InvalidToken,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
