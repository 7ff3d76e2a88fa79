//! API error types and JSON response formatting.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};

use crate::history::HistoryError;
use crate::quiz::QuizError;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API error type that converts to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn quiz_not_found(identifier: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "QUIZ_NOT_FOUND",
            format!("Quiz '{}' not found", identifier),
        )
        .with_details(serde_json::json!({ "quiz": identifier }))
    }

    pub fn empty_response_set() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "EMPTY_RESPONSE_SET",
            QuizError::EmptyResponseSet.to_string(),
        )
    }

    /// No record exists for the quiz.
    pub fn no_history(identifier: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "NO_HISTORY",
            format!("No history for quiz '{}'", identifier),
        )
        .with_details(serde_json::json!({ "quiz": identifier }))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                status = %self.status.as_u16(),
                code = %self.code,
                message = %self.message,
                "server error response"
            );
        } else if self.status.is_client_error() {
            debug!(
                status = %self.status.as_u16(),
                code = %self.code,
                message = %self.message,
                "client error response"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        match &err {
            QuizError::EmptyResponseSet => Self::empty_response_set(),
            QuizError::UnknownQuiz(identifier) => Self::quiz_not_found(identifier),
            QuizError::UnknownCategory(tag) => Self::new(
                StatusCode::BAD_REQUEST,
                "UNKNOWN_CATEGORY",
                err.to_string(),
            )
            .with_details(serde_json::json!({ "category": tag })),
            QuizError::MalformedQuestion { .. } => Self::internal(err.to_string()),
        }
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "HISTORY_WRITE_FAILED",
            err.to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_error_mapping() {
        let err = ApiError::from(QuizError::EmptyResponseSet);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "EMPTY_RESPONSE_SET");

        let err = ApiError::from(QuizError::UnknownQuiz("trivia".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "QUIZ_NOT_FOUND");

        let err = ApiError::from(QuizError::UnknownCategory("unicorn".into()));
        assert_eq!(err.code, "UNKNOWN_CATEGORY");
        assert_eq!(err.details, Some(serde_json::json!({ "category": "unicorn" })));
    }

    #[test]
    fn test_history_error_is_server_error() {
        let err = ApiError::from(HistoryError::Poisoned);
        assert!(err.status.is_server_error());
    }
}
