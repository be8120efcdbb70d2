//! Default `reqwest`-backed HTTP provider
//!
//! Injects bearer authentication and organization/project headers, applies the
//! configured timeout, proxy and connection pool settings, and optionally
//! throttles outgoing requests with a token bucket. It never retries.

use super::{HttpProvider, Request, Response};
use crate::config::{ConnectionPoolConfig, RateLimitConfig};
use crate::error::{Error, Result};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use http::{HeaderMap, HeaderName, HeaderValue, header::AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use std::num::NonZeroU32;
use std::{sync::Arc, time::Duration};

/// Header carrying the organization ID.
pub const ORGANIZATION_HEADER: &str = "openai-organization";

/// Header carrying the project ID.
pub const PROJECT_HEADER: &str = "openai-project";

/// HTTP provider for the OpenAI REST API.
///
/// # Example
///
/// ```rust,no_run
/// use turbostore::http::OpenAIHttpProvider;
/// use std::sync::Arc;
///
/// let provider = Arc::new(OpenAIHttpProvider::builder()
///     .api_key("sk-...")
///     .build()
///     .unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct OpenAIHttpProvider {
    pub(crate) inner: Arc<ProviderInner>,
}

pub(crate) struct ProviderInner {
    /// HTTP client for making requests
    pub(crate) http_client: reqwest::Client,
    /// Headers sent with every request, credentials included
    pub(crate) default_headers: HeaderMap,
    /// Default timeout for requests
    pub(crate) timeout: Duration,
    /// Token bucket shared by every request through this provider
    pub(crate) rate_limiter: Option<DefaultDirectRateLimiter>,
}

impl std::fmt::Debug for ProviderInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.default_headers.keys().map(|k| k.as_str()).collect();
        f.debug_struct("ProviderInner")
            .field("default_headers", &header_names)
            .field("timeout", &self.timeout)
            .field("rate_limited", &self.rate_limiter.is_some())
            .finish()
    }
}

impl OpenAIHttpProvider {
    /// Create a new builder for configuring the provider.
    pub fn builder() -> OpenAIHttpProviderBuilder {
        OpenAIHttpProviderBuilder::default()
    }

    fn map_send_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout(self.inner.timeout)
        } else {
            Error::Connection(error.to_string())
        }
    }
}

#[async_trait]
impl HttpProvider for OpenAIHttpProvider {
    async fn execute(&self, request: Request) -> Result<Response> {
        if let Some(limiter) = &self.inner.rate_limiter {
            limiter.until_ready().await;
        }

        let (method, url, request_headers, body) = request.into_parts();

        let mut headers = self.inner.default_headers.clone();
        for (key, value) in &request_headers {
            headers.insert(key.clone(), value.clone());
        }

        let mut req = self
            .inner
            .http_client
            .request(method, url)
            .timeout(self.inner.timeout)
            .headers(headers);

        if let Some(body) = body {
            req = req.body(body);
        }

        let resp = req.send().await.map_err(|e| self.map_send_error(e))?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await.map_err(|e| self.map_send_error(e))?;

        Ok(Response::new(status, headers, body))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

/// Builder for creating an `OpenAIHttpProvider` with custom configuration.
#[derive(Default)]
pub struct OpenAIHttpProviderBuilder {
    api_key: Option<SecretString>,
    organization: Option<String>,
    project: Option<String>,
    timeout: Option<Duration>,
    proxy: Option<String>,
    connection_pool: ConnectionPoolConfig,
    rate_limit: Option<RateLimitConfig>,
    default_headers: HeaderMap,
}

impl OpenAIHttpProviderBuilder {
    /// Set the API key, sent as `Authorization: Bearer <key>`.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into().into_boxed_str()));
        self
    }

    /// Set the API key from an existing secret.
    pub fn api_key_secret(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set the organization ID.
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Set the project ID.
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 600 seconds (10 minutes).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Route every request through an HTTP proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set connection pool configuration.
    pub fn connection_pool(mut self, config: ConnectionPoolConfig) -> Self {
        self.connection_pool = config;
        self
    }

    /// Throttle outgoing requests.
    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = Some(config);
        self
    }

    /// Add already validated headers to include with every request.
    pub fn headers(mut self, headers: &HeaderMap) -> Self {
        for (key, value) in headers {
            self.default_headers.insert(key.clone(), value.clone());
        }
        self
    }

    /// Add a custom header to include with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key = key_str
            .parse::<HeaderName>()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value = value_str
            .parse::<HeaderValue>()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the provider with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No API key is provided (and `OPENAI_API_KEY` is unset with the `env` feature)
    /// - A header value is invalid
    /// - The proxy URL is invalid or the HTTP client cannot be created
    pub fn build(mut self) -> Result<OpenAIHttpProvider> {
        #[cfg(feature = "env")]
        {
            if self.api_key.is_none() {
                self.api_key = std::env::var("OPENAI_API_KEY")
                    .ok()
                    .map(|s| SecretString::new(s.into_boxed_str()));
            }
        }

        let api_key = self.api_key.take().ok_or_else(|| {
            Error::MissingConfig(
                "No API key provided. Set OPENAI_API_KEY or provide one explicitly.".to_string(),
            )
        })?;

        let mut default_headers = std::mem::take(&mut self.default_headers);

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|_| Error::InvalidHeaderValue("authorization: <redacted>".to_string()))?;
        auth.set_sensitive(true);
        default_headers.insert(AUTHORIZATION, auth);

        if let Some(organization) = &self.organization {
            let value = HeaderValue::from_str(organization)
                .map_err(|_| Error::InvalidHeaderValue(organization.clone()))?;
            default_headers.insert(ORGANIZATION_HEADER, value);
        }
        if let Some(project) = &self.project {
            let value = HeaderValue::from_str(project)
                .map_err(|_| Error::InvalidHeaderValue(project.clone()))?;
            default_headers.insert(PROJECT_HEADER, value);
        }

        let timeout = self.timeout.unwrap_or(Duration::from_secs(600));

        let mut client_builder = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("turbostore-rust/{}", crate::VERSION))
            .pool_max_idle_per_host(self.connection_pool.max_idle_per_host)
            .pool_idle_timeout(self.connection_pool.idle_timeout)
            .tcp_keepalive(self.connection_pool.tcp_keepalive);

        if let Some(proxy) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| Error::HttpClient(format!("Invalid proxy '{}': {}", proxy, e)))?;
            client_builder = client_builder.proxy(proxy);
        }

        let http_client = client_builder
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        let rate_limiter = self.rate_limit.as_ref().map(build_rate_limiter);

        Ok(OpenAIHttpProvider {
            inner: Arc::new(ProviderInner {
                http_client,
                default_headers,
                timeout,
                rate_limiter,
            }),
        })
    }
}

/// Non-positive rates fall back to one request per second.
fn build_rate_limiter(config: &RateLimitConfig) -> DefaultDirectRateLimiter {
    let per_second = NonZeroU32::new(config.requests_per_second.max(0.0) as u32)
        .unwrap_or(NonZeroU32::MIN);
    let burst = NonZeroU32::new(config.burst_size).unwrap_or(per_second);
    RateLimiter::direct(Quota::per_second(per_second).allow_burst(burst))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_with_api_key() {
        let provider = OpenAIHttpProvider::builder()
            .api_key("test-key")
            .build()
            .unwrap();

        assert_eq!(provider.provider_name(), "openai");
        let auth = &provider.inner.default_headers[AUTHORIZATION];
        assert_eq!(auth, "Bearer test-key");
        assert!(auth.is_sensitive());
    }

    #[test]
    fn test_builder_without_credentials_fails() {
        temp_env::with_var_unset("OPENAI_API_KEY", || {
            let result = OpenAIHttpProvider::builder().build();
            assert!(matches!(result, Err(Error::MissingConfig(_))));
        });
    }

    #[test]
    fn test_builder_with_custom_config() {
        let provider = OpenAIHttpProvider::builder()
            .api_key("test-key")
            .organization("org-1")
            .project("proj-1")
            .timeout(Duration::from_secs(30))
            .header("X-Custom-Header", "custom-value")
            .unwrap()
            .rate_limit(RateLimitConfig::default())
            .build()
            .unwrap();

        let headers = &provider.inner.default_headers;
        assert_eq!(headers[ORGANIZATION_HEADER], "org-1");
        assert_eq!(headers[PROJECT_HEADER], "proj-1");
        assert!(headers.contains_key("x-custom-header"));
        assert_eq!(provider.inner.timeout, Duration::from_secs(30));
        assert!(provider.inner.rate_limiter.is_some());
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let provider = OpenAIHttpProvider::builder()
            .api_key("sk-super-secret")
            .build()
            .unwrap();
        assert!(!format!("{provider:?}").contains("sk-super-secret"));
    }

    #[test]
    fn test_rate_limiter_floor() {
        let limiter = build_rate_limiter(&RateLimitConfig {
            requests_per_second: 0.0,
            burst_size: 0,
        });
        assert!(limiter.check().is_ok());
    }
}
