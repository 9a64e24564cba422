use serde::Deserialize;
use thiserror::Error;

use crate::http::{HttpError, Response};

/// Failure of a call to the file service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Transport(String),
    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Server {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    /// A newer request superseded this one before it completed.
    #[error("Request cancelled")]
    Cancelled,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

impl ApiError {
    /// Builds a `Server` error from a failed response.
    ///
    /// Prefers the structured `{"error": {"code", "message"}}` payload, then a
    /// plain-text body, then `fallback`.
    pub fn from_response(response: &Response, fallback: &str) -> Self {
        if let Ok(envelope) = response.json::<ErrorEnvelope>() {
            return Self::Server {
                status: response.status,
                code: envelope.error.code,
                message: envelope.error.message,
            };
        }

        let message = response
            .text()
            .ok()
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty() && !t.starts_with('<'))
            .unwrap_or_else(|| fallback.to_owned());

        Self::Server {
            status: response.status,
            code: None,
            message,
        }
    }

    /// The machine-readable error code reported by the service, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Server { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        Self::Transport(e.message)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
