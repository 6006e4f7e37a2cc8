//! API error types with IntoResponse
//!
//! Every error renders as `{"detail": <message>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;

/// Message returned when a roll number is already stored.
pub const DUPLICATE_ROLL_NUMBER: &str = "Roll number already exists.";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body rejected during extraction (status chosen by the extractor)
    Validation { status: StatusCode, message: String },

    /// Roll number already stored (400)
    DuplicateRollNumber,

    /// Any other store failure (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Validation { status, message } => (status, message),
            Self::DuplicateRollNumber => (StatusCode::BAD_REQUEST, DUPLICATE_ROLL_NUMBER.to_owned()),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}
