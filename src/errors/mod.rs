//! Error handling module for the issue tracker backend.
//!
//! Provides the error taxonomy with mapping to HTTP status codes and the `{"error": ...}` body.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Message returned when an issue id does not resolve.
pub const ISSUE_NOT_FOUND: &str = "Issue not found";

/// Message returned when a create request has no usable title.
pub const TITLE_REQUIRED: &str = "Title is required";

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Required field missing or empty
    Validation(String),
    /// Issue id did not resolve
    NotFound(String),
    /// Anything else: malformed parameters, poisoned state, serialization
    Internal(String),
}

impl AppError {
    pub fn issue_not_found() -> Self {
        AppError::NotFound(ISSUE_NOT_FOUND.to_string())
    }

    pub fn title_required() -> Self {
        AppError::Validation(TITLE_REQUIRED.to_string())
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Internal(msg) => msg,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message(), self.status_code())
    }
}

impl std::error::Error for AppError {}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::error!("Query parameter error: {:?}", rejection);
        AppError::Internal(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::error!("Request body error: {:?}", rejection);
        AppError::Internal(rejection.body_text())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Internal(format!("JSON error: {}", err))
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::title_required().status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::issue_not_found().status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(AppError::title_required().message(), "Title is required");
        assert_eq!(AppError::issue_not_found().message(), "Issue not found");
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = AppError::issue_not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Issue not found" }));
    }
}
