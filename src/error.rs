//! Error types and HTTP error response handling.
//!
//! Query failures are never swallowed. Every `sqlx::Error` is classified
//! into an `AppError` variant so that callers can tell a constraint
//! violation apart from an unreachable database or a malformed request.
//! An empty result is not an error at all: lookups return `Option`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Not found**: a lookup matched nothing (only raised by HTTP handlers)
/// - **Constraint violations**: unique, foreign key or check constraints
/// - **Unavailable**: the database could not be reached in time
/// - **Invalid requests**: input rejected before any SQL is sent
/// - **Database**: everything else that went wrong inside the store
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Query failed for a reason that is neither a constraint violation nor
    /// a connectivity problem (malformed SQL, decode failure, ...).
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// The database could not be reached: I/O or TLS failure, pool acquire
    /// timeout, or a closed pool. Safe to retry.
    ///
    /// Returns HTTP 503 Service Unavailable.
    #[error("Database unavailable: {0}")]
    Unavailable(sqlx::Error),

    /// A write violated a table constraint, e.g. a duplicate email or a
    /// property whose owner does not exist. Holds the constraint name.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Requested user does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("User not found")]
    UserNotFound,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl AppError {
    /// Whether retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Unavailable(_))
    }
}

/// Classify a driver error.
///
/// This is what lets services use `?` on every query while still surfacing
/// distinct failure kinds.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation()
                || db_err.is_foreign_key_violation()
                || db_err.is_check_violation()
            {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                tracing::warn!("Constraint violation on {}: {}", constraint, db_err);
                return AppError::ConstraintViolation(constraint);
            }
        }

        if matches!(
            err,
            sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed
        ) {
            tracing::warn!("Database unavailable: {}", err);
            return AppError::Unavailable(err);
        }

        tracing::error!("Database error: {}", err);
        AppError::Database(err)
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// Driver details are never sent to the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "user_not_found", self.to_string()),
            AppError::ConstraintViolation(_) => {
                (StatusCode::CONFLICT, "constraint_violation", self.to_string())
            }
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Unavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "database_unavailable",
                "The database is temporarily unavailable".to_string(),
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
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
