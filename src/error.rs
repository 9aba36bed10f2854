//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the crate.
//! Every fallible operation (identity generation, validation, response filtering,
//! storage access, configuration loading) reports through it.
//!
//! `AppError` implements `actix_web::error::ResponseError` so request handlers built
//! on top of these models can return it directly and get a JSON error body with a
//! matching status code. A `From<sqlx::Error>` implementation lets storage calls use `?`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

use crate::models::validation::Violation;

/// Represents all possible errors that can occur within the crate.
#[derive(Debug)]
pub enum AppError {
    /// A requested record was not found (HTTP 404).
    NotFound(String),
    /// An error raised by the storage engine (HTTP 500).
    ///
    /// The original `sqlx::Error` is kept so callers can inspect unique or
    /// foreign-key violations.
    DatabaseError(sqlx::Error),
    /// One or more input fields failed validation (HTTP 422).
    ValidationError(Vec<Violation>),
    /// The identifier source could not produce a new identity; no entity was created.
    IdGeneration(String),
    /// A stored identity string is not a well-formed UUID.
    InvalidIdentity(String),
    /// Required configuration is missing or unparsable.
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::DatabaseError(err) => write!(f, "Database Error: {}", err),
            AppError::ValidationError(violations) => {
                let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
                write!(f, "Validation Error: {}", fields.join(", "))
            }
            AppError::IdGeneration(msg) => write!(f, "Identity Generation Error: {}", msg),
            AppError::InvalidIdentity(msg) => write!(f, "Invalid Identity: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::DatabaseError(err) => Some(err),
            _ => None,
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Validation failures carry the full violation list; every other variant is
/// reported as a single `error` message.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_)
            | AppError::IdGeneration(_)
            | AppError::InvalidIdentity(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ValidationError(violations) => {
                HttpResponse::build(self.status_code()).json(json!({
                    "status": "fail",
                    "errors": violations
                }))
            }
            // Storage details stay in the logs, not in the response body.
            AppError::DatabaseError(err) => {
                log::error!("database error: {}", err);
                HttpResponse::build(self.status_code()).json(json!({
                    "error": "Database error"
                }))
            }
            _ => HttpResponse::build(self.status_code()).json(json!({
                "error": self.to_string()
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` becomes `AppError::NotFound`; everything else is
/// wrapped untouched in `AppError::DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error),
        }
    }
}
