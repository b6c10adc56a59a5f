// Error taxonomy shared by the library, the CLI and the HTTP handlers

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Method not allowed")]
    InvalidMethod,
    #[error("{0}")]
    Validation(String),
    #[error("Anthropic API error: {status}")]
    Upstream { status: u16 },
    #[error("Failed to reach content API: {0}")]
    Transport(String),
    #[error("{0}")]
    Parse(String),
    #[error("Failed to create PDF: {0}")]
    Render(String),
    #[error("{0}")]
    Internal(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidMethod => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(AppError::InvalidMethod.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            AppError::Validation("Dish is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Upstream { status: 529 }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Parse("Failed to parse AI response".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_message_embeds_status() {
        let err = AppError::Upstream { status: 401 };
        assert_eq!(err.to_string(), "Anthropic API error: 401");
    }

    #[test]
    fn internal_error_message_is_verbatim() {
        let err = AppError::Internal("API request failed".into());
        assert_eq!(err.to_string(), "API request failed");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn render_error_keeps_underlying_message() {
        let err = AppError::Render("font table missing".into());
        assert_eq!(err.to_string(), "Failed to create PDF: font table missing");
    }
}
