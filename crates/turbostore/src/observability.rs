//! Structured logging for dispatched requests
//!
//! The dispatcher opens one [`RequestLog`] per call and closes it with the
//! outcome, so every event for a call carries the same fields. Credentials and
//! bodies are never logged, only their sizes.

use crate::error::Error;
use crate::http::Response;
use http::Method;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Log record for one request, from send to outcome.
#[derive(Debug, Clone)]
pub struct RequestLog {
    method: Method,
    path: String,
    body_size: Option<usize>,
    started: Instant,
}

impl RequestLog {
    /// Start timing a request to `path`, relative to the API base.
    pub fn start(method: &Method, path: impl Into<String>, body_size: Option<usize>) -> Self {
        Self {
            method: method.clone(),
            path: path.into(),
            body_size,
            started: Instant::now(),
        }
    }

    /// Time since [`RequestLog::start`].
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// The request is about to be handed to the provider.
    pub fn sent(&self) {
        debug!(
            method = %self.method,
            path = %self.path,
            body_size = self.body_size,
            "dispatching request"
        );
    }

    /// The provider returned a response; 2xx logs at info, anything else at warn.
    pub fn responded(&self, response: &Response) {
        let status = response.status().as_u16();
        let elapsed_ms = self.elapsed().as_millis() as u64;
        let response_size = response.body().len();

        if response.is_success() {
            info!(
                method = %self.method,
                path = %self.path,
                status,
                elapsed_ms,
                response_size,
                "request completed"
            );
        } else {
            warn!(
                method = %self.method,
                path = %self.path,
                status,
                elapsed_ms,
                request_id = response.request_id(),
                "request rejected by service"
            );
        }
    }

    /// No response was received.
    pub fn failed(&self, error: &Error) {
        warn!(
            method = %self.method,
            path = %self.path,
            elapsed_ms = self.elapsed().as_millis() as u64,
            kind = ?error.kind(),
            %error,
            "request did not complete"
        );
    }
}

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `turbostore=info`).
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub fn init_tracing() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("turbostore=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, StatusCode};

    #[test]
    fn test_request_log_fields() {
        let log = RequestLog::start(&Method::POST, "/vector_stores", Some(42));
        assert_eq!(log.method, Method::POST);
        assert_eq!(log.path, "/vector_stores");
        assert_eq!(log.body_size, Some(42));
    }

    #[test]
    fn test_elapsed_grows() {
        let log = RequestLog::start(&Method::GET, "/vector_stores", None);
        std::thread::sleep(Duration::from_millis(10));
        assert!(log.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn test_outcomes_log_under_a_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let log = RequestLog::start(&Method::DELETE, "/vector_stores/vs_1", None);
            log.sent();
            log.responded(&Response::new(StatusCode::OK, HeaderMap::new(), "{}"));
            log.responded(&Response::new(StatusCode::NOT_FOUND, HeaderMap::new(), ""));
            log.failed(&Error::Cancelled);
        });
    }
}
