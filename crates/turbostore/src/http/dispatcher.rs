//! Request dispatch: URL composition, headers, logging and response mapping
//!
//! Every resource operation funnels through [`Dispatcher`]. It joins the
//! resource path onto the configured base URL, attaches the protocol version
//! header, serializes the body, calls the provider exactly once and maps the
//! response into a typed value or an [`Error`].

use super::{HttpProvider, Request, Response};
use crate::error::{Error, Result};
use crate::observability::RequestLog;
use crate::path::ResourcePath;
use http::{HeaderMap, HeaderName, HeaderValue, Method, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt, sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Per-call overrides applied by the dispatcher.
///
/// The timeout here bounds the whole call on top of whatever the provider
/// enforces. Cancelling the token drops the in-flight request.
///
/// ```rust
/// use std::time::Duration;
/// use turbostore::http::RequestOptions;
/// use turbostore::CancellationToken;
///
/// let token = CancellationToken::new();
/// let options = RequestOptions::new()
///     .timeout(Duration::from_secs(5))
///     .cancellation(token.clone())
///     .header("x-trace-id", "abc")
///     .unwrap();
/// assert_eq!(options.timeout_duration(), Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
    headers: HeaderMap,
}

impl RequestOptions {
    /// Options with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`Error::Timeout`] if the call takes longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Fail with [`Error::Cancelled`] once `token` is cancelled.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Add an extra header for these calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let key_str = key.as_ref();
        let value_str = value.as_ref();

        let key = key_str
            .parse::<HeaderName>()
            .map_err(|_| Error::InvalidHeaderName(key_str.to_string()))?;
        let value = value_str
            .parse::<HeaderValue>()
            .map_err(|_| Error::InvalidHeaderValue(value_str.to_string()))?;

        self.headers.insert(key, value);
        Ok(self)
    }

    /// The per-call timeout, if set.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }

    /// The cancellation token, if set.
    pub fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Extra headers for these calls.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Sends requests for resource operations.
///
/// Cheap to clone; all clones share one provider.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    provider: Arc<dyn HttpProvider>,
    /// Validated base URL without a trailing slash
    base_url: String,
    /// Value of the protocol version header
    api_version: HeaderValue,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("provider", &self.inner.provider.provider_name())
            .field("base_url", &self.inner.base_url)
            .field("api_version", &self.inner.api_version)
            .finish()
    }
}

impl Dispatcher {
    /// Create a dispatcher sending through `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `base_url` is empty, does not parse or
    /// is not `http`/`https`, and [`Error::InvalidHeaderValue`] if
    /// `api_version` cannot be sent as a header.
    pub fn new(provider: Arc<dyn HttpProvider>, base_url: &str, api_version: &str) -> Result<Self> {
        let base_url = validate_base_url(base_url)?;
        let api_version = HeaderValue::from_str(api_version)
            .map_err(|_| Error::InvalidHeaderValue(api_version.to_string()))?;

        Ok(Self {
            inner: Arc::new(DispatcherInner {
                provider,
                base_url,
                api_version,
            }),
        })
    }

    /// The base URL every path is joined onto.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The protocol version header value.
    pub fn api_version(&self) -> &str {
        self.inner.api_version.to_str().unwrap_or_default()
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &'static str {
        self.inner.provider.provider_name()
    }

    /// Absolute URL for a resource path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the joined URL does not parse, and
    /// [`Error::InvalidRequest`] if an identifier is `.` or `..`, which the URL
    /// parser would resolve against its parent.
    pub fn url_for(&self, path: &ResourcePath) -> Result<Url> {
        if let Some(segment) = path.dot_segment() {
            return Err(Error::InvalidRequest(format!(
                "identifier `{segment}` cannot be used as a path segment"
            )));
        }
        let raw = format!("{}{}", self.inner.base_url, path.as_str());
        Url::parse(&raw).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Send a bodiless request and decode the JSON response.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &ResourcePath,
        options: &RequestOptions,
    ) -> Result<T> {
        self.dispatch(method, path, None, options)
            .await?
            .parse_result()
    }

    /// Send `body` as JSON and decode the JSON response.
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &ResourcePath,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(body).map_err(Error::Serialization)?;
        self.dispatch(method, path, Some(body), options)
            .await?
            .parse_result()
    }

    /// Send a bodiless request and ignore the response body.
    ///
    /// Any 2xx status succeeds, including an empty 204.
    pub async fn send_discarding(
        &self,
        method: Method,
        path: &ResourcePath,
        options: &RequestOptions,
    ) -> Result<()> {
        self.dispatch(method, path, None, options)
            .await?
            .discard_result()
    }

    /// Build the request for `path`, with the body already serialized.
    pub fn build_request(
        &self,
        method: Method,
        path: &ResourcePath,
        body: Option<Vec<u8>>,
        options: &RequestOptions,
    ) -> Result<Request> {
        let url = self.url_for(path)?;

        let mut request = Request::new(method, url).headers_from(options.headers());
        request
            .headers_mut()
            .insert(crate::API_VERSION_HEADER, self.inner.api_version.clone());

        if let Some(body) = body {
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            request = request.body(body);
        }

        Ok(request)
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &ResourcePath,
        body: Option<Vec<u8>>,
        options: &RequestOptions,
    ) -> Result<Response> {
        let log = RequestLog::start(&method, path.as_str(), body.as_ref().map(Vec::len));
        let request = self.build_request(method, path, body, options)?;

        log.sent();
        match self.execute(request, options).await {
            Ok(response) => {
                log.responded(&response);
                Ok(response.with_elapsed(log.elapsed()))
            }
            Err(error) => {
                log.failed(&error);
                Err(error)
            }
        }
    }

    async fn execute(&self, request: Request, options: &RequestOptions) -> Result<Response> {
        let call = async {
            let send = self.inner.provider.execute(request);
            match options.timeout {
                Some(timeout) => tokio::time::timeout(timeout, send)
                    .await
                    .unwrap_or_else(|_| Err(Error::Timeout(timeout))),
                None => send.await,
            }
        };

        match &options.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(Error::Cancelled),
                    result = call => result,
                }
            }
            None => call.await,
        }
    }
}

fn validate_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("base URL is empty".to_string()));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(Error::InvalidUrl(format!(
            "{}: unsupported scheme '{}', expected http or https",
            base_url, scheme
        ))),
    }
}
