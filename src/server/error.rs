//! Protocol-level errors with OpenAI-compatible bodies.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum SimulatorError {
    /// The requested model is not in the catalog.
    #[error("Model {model} not found. Available models: {}", .available.join(", "))]
    InvalidModel {
        model: String,
        available: Vec<String>,
    },

    /// The body could not be parsed into a chat request.
    #[error("Invalid request body: {message}")]
    MalformedRequest { status: StatusCode, message: String },

    /// Failure produced by error injection.
    #[error("simulated error")]
    Injected { status: StatusCode },
}

impl From<JsonRejection> for SimulatorError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl SimulatorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidModel { .. } => StatusCode::BAD_REQUEST,
            Self::MalformedRequest { status, .. } | Self::Injected { status } => *status,
        }
    }

    pub fn error_type(&self) -> &'static str {
        if self.status_code().is_server_error() {
            "server_error"
        } else {
            "invalid_request_error"
        }
    }
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub message: String,
    pub r#type: String,
    pub code: u16,
}

impl IntoResponse for SimulatorError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = status.as_u16(), "{self}");
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                message: self.to_string(),
                r#type: self.error_type().to_string(),
                code: status.as_u16(),
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_model_message_names_model_and_catalog() {
        let err = SimulatorError::InvalidModel {
            model: "not-a-model".into(),
            available: vec!["gpt-4".into(), "gpt-4o".into()],
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type(), "invalid_request_error");
        assert_eq!(
            err.to_string(),
            "Model not-a-model not found. Available models: gpt-4, gpt-4o"
        );
    }

    #[test]
    fn test_injected_status_and_type() {
        let err = SimulatorError::Injected {
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.error_type(), "server_error");

        let err = SimulatorError::Injected {
            status: StatusCode::TOO_MANY_REQUESTS,
        };
        assert_eq!(err.error_type(), "invalid_request_error");
    }

    #[test]
    fn test_into_response_status() {
        let resp = SimulatorError::InvalidModel {
            model: "x".into(),
            available: vec![],
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
