//! Unified error handling
//!
//! [`AppError`] is what every handler returns. It maps onto an HTTP status
//! and a small JSON body:
//!
//! | Variant | Status | Body |
//! |---------|--------|------|
//! | `MissingFields` | 400 | `{"error": "Missing fields: ...", "fields": [...]}` |
//! | `Validation` | 400 | `{"error": msg}` |
//! | `NotFound` | 404 | `{"error": "Not found"}` |
//! | `Conflict` | 409 | `{"error": msg}` |
//! | `Database` | 500 | `{"error": "Internal error"}` |
//!
//! Server-side failures are logged here and never echoed to the caller.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Error body returned to clients
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<&'static str>>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Client errors (4xx) ==========
    #[error("Missing fields: {}", .0.join(", "))]
    /// Required fields absent or blank (400)
    MissingFields(Vec<&'static str>),

    #[error("{0}")]
    /// Malformed or out-of-range input (400)
    Validation(String),

    #[error("Not found")]
    /// No row with the requested id (404)
    NotFound,

    #[error("{0}")]
    /// Unique constraint violated (409)
    Conflict(String),

    // ========== Server errors (5xx) ==========
    #[error("Database error: {0}")]
    /// Any unclassified storage failure (500)
    Database(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::MissingFields(fields) => ErrorBody {
                error: format!("Missing fields: {}", fields.join(", ")),
                fields: Some(fields),
            },
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                ErrorBody {
                    error: "Internal error".to_string(),
                    fields: None,
                }
            }
            other => ErrorBody {
                error: other.to_string(),
                fields: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(_) => AppError::NotFound,
            // Email is the only user-controlled unique column
            RepoError::Duplicate(_) => AppError::Conflict("Email already exists".to_string()),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid JSON body: {}", e.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::Validation(format!("Invalid query: {}", e.body_text()))
    }
}
