use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Stable, machine-checkable failure kind reported alongside every error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    ValidationFailed,
    RateLimited,
    DateConflict,
    NotFound,
    InvalidTransition,
    PersistenceFailure,
    NotificationFailure,
    Unauthorized,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("{0}")]
    DateConflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidTransition(String),
    #[error("Notification failed: {0}")]
    Notification(String),
    #[error("Unauthorized")]
    Unauthorized,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Database(_) => ErrorKind::PersistenceFailure,
            AppError::Validation(_) => ErrorKind::ValidationFailed,
            AppError::RateLimited(_) => ErrorKind::RateLimited,
            AppError::DateConflict(_) => ErrorKind::DateConflict,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::InvalidTransition(_) => ErrorKind::InvalidTransition,
            AppError::Notification(_) => ErrorKind::NotificationFailure,
            AppError::Unauthorized => ErrorKind::Unauthorized,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, msg.clone()),
            AppError::DateConflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::InvalidTransition(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Notification(msg) => {
                error!("Notification error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        };

        let body = Json(json!({
            "success": false,
            "kind": self.kind(),
            "message": message
        }));

        (status, body).into_response()
    }
}

// Extractor rejections keep parser detail out of the response body.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        let message = match rejection {
            JsonRejection::JsonDataError(_) => "Request body has missing or invalid fields",
            JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
            JsonRejection::MissingJsonContentType(_) => "Expected a JSON request body",
            _ => "Invalid request body",
        };
        AppError::Validation(message.to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        warn!("Rejected query string: {}", rejection.body_text());
        AppError::Validation("Invalid query string".to_string())
    }
}
