//! HTTP response handling

use crate::error::{Error, Result};
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP response as returned by a provider, body fully buffered.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    elapsed: Duration,
}

impl Response {
    /// Create a new response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            elapsed: Duration::ZERO,
        }
    }

    /// Record how long the request took.
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Get the body as lossy UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Time spent on the request/response cycle.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Request ID echoed by the service.
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
    }

    /// Check if the response is successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Turn a non-2xx response into an API error.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::from_response(
                self.status.as_u16(),
                &self.text(),
                &self.headers,
            ))
        }
    }

    /// Decode a successful response, converting HTTP errors to client errors.
    ///
    /// Non-2xx statuses become [`Error::Api`]; bodies that do not match `T`
    /// become [`Error::Decode`].
    pub fn parse_result<T: DeserializeOwned>(self) -> Result<T> {
        let response = self.error_for_status()?;
        serde_json::from_slice(&response.body).map_err(|e| Error::decode(e, &response.body))
    }

    /// Check the status and drop the body without decoding it.
    pub fn discard_result(self) -> Result<()> {
        self.error_for_status().map(|_| ())
    }
}
