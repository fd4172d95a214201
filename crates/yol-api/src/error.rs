//! Error types for the mock API

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::models::{ErrorDetail, ErrorResponse};

/// Result type alias for service and route operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Mock API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("E-mail ou senha inválidos")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &'static str) -> Self {
        ApiError::NotFound { resource }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Offending request field, when there is one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ApiError::InvalidCredentials => Some("email"),
            ApiError::InvalidToken => Some("token"),
            _ => None,
        }
    }

    /// Validation rule that rejected the request
    pub fn rule(&self) -> Option<&'static str> {
        match self {
            ApiError::InvalidCredentials => Some("auth"),
            ApiError::InvalidToken => Some("invalid"),
            ApiError::Validation(_) => Some("validation"),
            _ => None,
        }
    }

    /// Render as the `{errors: [...]}` envelope
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            errors: vec![ErrorDetail {
                message: self.to_string(),
                field: self.field().map(str::to_string),
                rule: self.rule().map(str::to_string),
            }],
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, axum::Json(self.to_error_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_envelope() {
        let err = ApiError::not_found("Folder");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let body = serde_json::to_value(err.to_error_response()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"errors": [{"message": "Folder not found"}]})
        );
    }

    #[test]
    fn test_invalid_credentials_envelope() {
        let err = ApiError::InvalidCredentials;
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let body = serde_json::to_value(err.to_error_response()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"errors": [{
                "message": "E-mail ou senha inválidos",
                "field": "email",
                "rule": "auth"
            }]})
        );
    }

    #[test]
    fn test_invalid_token_is_bad_request() {
        let err = ApiError::InvalidToken;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.field(), Some("token"));
        assert_eq!(err.rule(), Some("invalid"));
    }
}
