//! Client-side error types

use thiserror::Error;

/// Fallback when an error response carries no message
pub const UNKNOWN_ERROR: &str = "Erro desconhecido";

pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by [`ApiClient`](crate::ApiClient)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Non-2xx response; `message` is the first entry of the error envelope
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_message() {
        let err = ClientError::Api {
            status: 401,
            message: "E-mail ou senha inválidos".to_string(),
        };
        assert_eq!(err.to_string(), "E-mail ou senha inválidos");
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_not_found());
        assert_eq!(ClientError::Transport("refused".into()).status(), None);
    }
}
