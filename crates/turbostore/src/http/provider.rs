//! HTTP provider trait for abstracting the transport
//!
//! The dispatcher builds complete requests and hands them to an
//! `HttpProvider`, which owns the connection pool, credentials and any
//! retry or rate-limit policy. Swapping the provider swaps the transport
//! without touching resource code.

use super::{Request, Response};
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Transport used by the client to send requests.
///
/// Implementations must be safe to share across tasks. They send the request
/// exactly as given plus any credentials they own, and return the buffered
/// response for every HTTP status. Only failures that produced no response
/// (connection, timeout) are returned as errors.
///
/// # Example
///
/// ```rust
/// use turbostore::http::{HttpProvider, Request, Response, StatusCode, HeaderMap};
/// use turbostore::async_trait;
///
/// #[derive(Debug)]
/// struct Canned;
///
/// #[async_trait]
/// impl HttpProvider for Canned {
///     async fn execute(&self, _request: Request) -> turbostore::Result<Response> {
///         Ok(Response::new(StatusCode::NO_CONTENT, HeaderMap::new(), ""))
///     }
///
///     fn provider_name(&self) -> &'static str {
///         "canned"
///     }
/// }
/// ```
#[async_trait]
pub trait HttpProvider: Send + Sync + fmt::Debug {
    /// Send one request and return the response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`](crate::Error::Connection) or
    /// [`Error::Timeout`](crate::Error::Timeout) when no response was received.
    async fn execute(&self, request: Request) -> Result<Response>;

    /// Get the provider name for debugging/logging.
    fn provider_name(&self) -> &'static str;
}
