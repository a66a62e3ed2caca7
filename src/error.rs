use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0} not found")]
    NotFound(String),

    /// A student write names a course that does not exist.
    #[error("Course {0} not found, invalid course_id")]
    CourseNotFound(i64),

    #[error("Course {0} has enrolled students")]
    StudentsEnrolled(i64),

    #[error("Student is enrolled in active course {0}")]
    CourseActive(i64),

    /// A stored reference no longer resolves. Only reachable after an
    /// earlier integrity failure.
    #[error("Inconsistent state: {0}")]
    InconsistentState(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Malformed or incomplete request bodies are reported like any other
/// invalid input.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::CourseNotFound(_) => StatusCode::NOT_FOUND,
            AppError::StudentsEnrolled(_) | AppError::CourseActive(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::InconsistentState(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Database(e) => {
                error!("database error: {}", e);
                "Database error occurred".to_string()
            }
            AppError::InconsistentState(detail) => {
                error!("inconsistent state: {}", detail);
                "Stored records are inconsistent".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: error_message,
        });

        (status, body).into_response()
    }
}
