//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shoe Lab                               │
//! │                                                                         │
//! │  Handler -> ApiResult<T>                                               │
//! │       │                                                                 │
//! │       ├── DbError::NotFound      ──► 404 NOT_FOUND                     │
//! │       ├── CoreError::MissingFields ─► 400 VALIDATION_ERROR             │
//! │       ├── CoreError::Rejected    ──► 422 RULE_VIOLATION (+violations)  │
//! │       ├── DbError::QueryFailed   ──► 500 DATABASE_ERROR (logged only)  │
//! │       └── Success ──────────────► 2xx + JSON                           │
//! │                                                                         │
//! │  Client receives:                                                      │
//! │  { "code": "NOT_FOUND", "message": "Shoe not found" }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal details (SQL errors, pool state) are logged with `tracing::error!`
//! and replaced by a generic message before they reach the client.

use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shoelab_core::{CoreError, Violation};
use shoelab_db::DbError;
use thiserror::Error;

use crate::config::ConfigError;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "RULE_VIOLATION",
///   "message": "Configuration has blocking violations",
///   "violations": [{ "code": "BRAND_COLOR_BLOCK", ... }]
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Rule violations, only for `RULE_VIOLATION`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Malformed or incomplete input (400)
    ValidationError,

    /// Configuration breaks a business rule (422)
    RuleViolation,

    /// Database operation failed (500)
    DatabaseError,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::RuleViolation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found", resource))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a rule violation error carrying the offending violations.
    pub fn rule_violation(violations: Vec<Violation>) -> Self {
        ApiError {
            code: ErrorCode::RuleViolation,
            message: "Configuration has blocking violations".to_string(),
            violations,
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, .. } => ApiError::not_found(&entity),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ShoeNotFound(_) => ApiError::not_found("Shoe"),
            CoreError::MissingFields(_) | CoreError::NoFieldsToUpdate => {
                ApiError::validation(err.to_string())
            }
            CoreError::Rejected { violations } => ApiError::rule_violation(violations),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::validation(format!("Invalid JSON body: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Startup Errors
// =============================================================================

/// Errors that stop the server from starting or shutting down cleanly.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
