//! Error types for the vector store client
//!
//! Every failure belongs to exactly one [`ErrorKind`]: the request could not be
//! built, the transport failed, the remote service rejected the call, or the
//! response body did not match the expected schema. Nothing here is retried;
//! [`Error::is_retryable`] only classifies.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input caught before any network call.
    Request,
    /// Connectivity failure, timeout or cancellation.
    Transport,
    /// The service answered with a non-2xx status.
    Api,
    /// A 2xx body that could not be decoded into the expected type.
    Decode,
}

/// Main error type for the client.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid URL provided or produced while joining a path onto the base.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// The request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// The caller cancelled the request before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// The API returned a non-success status code.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the structured payload, or the raw body
        message: String,
        /// Structured error payload, when the body carried one
        error: Option<ApiErrorBody>,
        /// Request ID for debugging
        request_id: Option<String>,
    },

    /// Failed to decode a successful response body.
    #[error("Failed to decode API response: {source}")]
    Decode {
        /// Decoder error
        #[source]
        source: serde_json::Error,
        /// The body that failed to decode
        body: String,
    },
}

/// Structured error object returned by the API inside `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human readable message
    pub message: String,
    /// Error type, e.g. `invalid_request_error`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Parameter the error relates to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    /// Machine readable error code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

impl Error {
    /// Create an API error from an HTTP response status and body.
    pub fn from_response(status: u16, body: &str, headers: &http::HeaderMap) -> Self {
        let request_id = headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => Error::Api {
                status,
                message: envelope.error.message.clone(),
                error: Some(envelope.error),
                request_id,
            },
            Err(_) => Error::Api {
                status,
                message: if body.is_empty() {
                    http::StatusCode::from_u16(status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or("unknown error")
                        .to_string()
                } else {
                    body.to_string()
                },
                error: None,
                request_id,
            },
        }
    }

    /// Create a decode error for a body that did not match the expected type.
    pub fn decode(source: serde_json::Error, body: &[u8]) -> Self {
        Error::Decode {
            source,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidUrl(_)
            | Error::InvalidRequest(_)
            | Error::InvalidHeaderName(_)
            | Error::InvalidHeaderValue(_)
            | Error::Serialization(_)
            | Error::HttpClient(_)
            | Error::MissingConfig(_) => ErrorKind::Request,
            Error::Connection(_) | Error::Timeout(_) | Error::Cancelled => ErrorKind::Transport,
            Error::Api { .. } => ErrorKind::Api,
            Error::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// HTTP status code, for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the service reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Structured error payload, for API errors that carried one.
    pub fn api_error(&self) -> Option<&ApiErrorBody> {
        match self {
            Error::Api { error, .. } => error.as_ref(),
            _ => None,
        }
    }

    /// Request ID echoed by the service, if any.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Error::Api { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Check if a caller-side retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Connection(_) | Error::Timeout(_) => true,
            Error::Api { status, .. } => {
                *status >= 500 || *status == 408 || *status == 409 || *status == 429
            }
            _ => false,
        }
    }
}
