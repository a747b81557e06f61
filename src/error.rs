//!
//! # Error Handling
//!
//! Defines `AppError`, the single error type used by every handler in the
//! application. It implements `actix_web::error::ResponseError` so a handler
//! returning `Result<_, AppError>` renders the right HTTP status with a JSON
//! `{"message": ...}` body, and provides `From` conversions for the error
//! types of the underlying crates (`sqlx`, `validator`, `jsonwebtoken`,
//! `bcrypt`) so `?` works throughout.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// All failure classes the API can report.
///
/// Every variant carries a message that ends up verbatim in the response body.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or invalid input (HTTP 400).
    Validation(String),
    /// Missing, invalid, or expired credentials (HTTP 401).
    Unauthorized(String),
    /// The requested record does not exist, or is not owned by the caller (HTTP 404).
    NotFound(String),
    /// A uniqueness rule was violated, e.g. a taken username (HTTP 409).
    Conflict(String),
    /// An error from the database layer (HTTP 500). Wraps `sqlx` errors.
    Database(String),
    /// Any other unexpected server-side failure (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "message": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "message": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "message": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "message": msg
            })),
            // Store errors are never forwarded verbatim to the client.
            AppError::Database(_) => HttpResponse::InternalServerError().json(json!({
                "message": "Internal server error"
            })),
            AppError::Internal(msg) => HttpResponse::InternalServerError().json(json!({
                "message": msg
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to 404, a unique-constraint violation (Postgres code
/// 23505, hit when two registrations race past the pre-insert lookup) maps to
/// 409, and everything else becomes a `Database` error.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                AppError::Conflict("Email or username already exists".into())
            }
            _ => AppError::Database(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// JWT processing failures (bad signature, expiry, garbage input) are 401s.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

/// Bcrypt failures during hashing or verification are internal errors.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
