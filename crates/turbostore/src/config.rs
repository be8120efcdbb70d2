//! Client configuration
//!
//! A [`ClientConfig`] is plain data. Nothing is validated here; the base URL
//! and headers are checked when a client is built from it.

use http::{HeaderMap, HeaderName, HeaderValue};
use secrecy::SecretString;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Everything needed to build the default provider and dispatcher.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer credential
    pub api_key: Option<SecretString>,

    /// Sent as `OpenAI-Organization`
    pub organization: Option<String>,

    /// Sent as `OpenAI-Project`
    pub project: Option<String>,

    /// API root, [`DEFAULT_BASE_URL`](crate::DEFAULT_BASE_URL) when unset
    pub base_url: Option<String>,

    /// `OpenAI-Beta` value, [`DEFAULT_API_VERSION`](crate::DEFAULT_API_VERSION) when unset
    pub api_version: Option<String>,

    /// Upper bound for a single request/response cycle
    pub timeout: Duration,

    /// Headers added to every request
    pub default_headers: HeaderMap,

    /// Proxy URL applied to all schemes
    pub proxy: Option<String>,

    /// Idle connection and keep-alive settings
    pub connection_pool: ConnectionPoolConfig,

    /// Client-side throttling; off when `None`
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            organization: None,
            project: None,
            base_url: None,
            api_version: None,
            timeout: DEFAULT_TIMEOUT,
            default_headers: HeaderMap::new(),
            proxy: None,
            connection_pool: ConnectionPoolConfig::default(),
            rate_limit: None,
        }
    }
}

impl ClientConfig {
    /// Default configuration authenticated with `api_key`.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(secret(api_key)),
            ..Default::default()
        }
    }

    /// Read configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    /// Unset or empty variables leave the default in place.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `OPENAI_API_KEY` | `api_key` |
    /// | `OPENAI_ORG_ID` | `organization` |
    /// | `OPENAI_PROJECT_ID` | `project` |
    /// | `OPENAI_BASE_URL` | `base_url` |
    /// | `OPENAI_BETA_VERSION` | `api_version` |
    /// | `OPENAI_TIMEOUT` | `timeout`, in whole seconds |
    /// | `OPENAI_PROXY` | `proxy` |
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if `OPENAI_TIMEOUT` is not a number of seconds.
    #[cfg(feature = "env")]
    #[cfg_attr(docsrs, doc(cfg(feature = "env")))]
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let timeout = match env_var("OPENAI_TIMEOUT") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| {
                    Error::InvalidRequest(format!(
                        "OPENAI_TIMEOUT must be a number of seconds, got '{}'",
                        raw
                    ))
                })?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_key: env_var("OPENAI_API_KEY").map(secret),
            organization: env_var("OPENAI_ORG_ID"),
            project: env_var("OPENAI_PROJECT_ID"),
            base_url: env_var("OPENAI_BASE_URL"),
            api_version: env_var("OPENAI_BETA_VERSION"),
            timeout,
            proxy: env_var("OPENAI_PROXY"),
            ..Default::default()
        })
    }

    /// Layer `other` on top of `self`.
    ///
    /// Set options in `other` win; headers are combined with `other`'s values
    /// replacing duplicates. A timeout equal to [`DEFAULT_TIMEOUT`] counts as unset.
    pub fn merge(self, other: ClientConfig) -> Self {
        let mut default_headers = self.default_headers;
        default_headers.extend(other.default_headers);

        Self {
            api_key: other.api_key.or(self.api_key),
            organization: other.organization.or(self.organization),
            project: other.project.or(self.project),
            base_url: other.base_url.or(self.base_url),
            api_version: other.api_version.or(self.api_version),
            timeout: if other.timeout == DEFAULT_TIMEOUT {
                self.timeout
            } else {
                other.timeout
            },
            default_headers,
            proxy: other.proxy.or(self.proxy),
            connection_pool: self.connection_pool,
            rate_limit: other.rate_limit.or(self.rate_limit),
        }
    }
}

#[cfg(feature = "env")]
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn secret(value: impl Into<String>) -> SecretString {
    SecretString::new(value.into().into_boxed_str())
}

/// Idle connection handling for the `reqwest` pool.
#[derive(Debug, Clone)]
pub struct ConnectionPoolConfig {
    /// Idle connections kept per host
    pub max_idle_per_host: usize,

    /// How long an idle connection is kept
    pub idle_timeout: Duration,

    /// TCP keep-alive interval; disabled when `None`
    pub tcp_keepalive: Option<Duration>,
}

impl Default for ConnectionPoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 10,
            idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Some(Duration::from_secs(60)),
        }
    }
}

/// Token bucket applied before each request leaves the provider.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Sustained rate; values below one are raised to one
    pub requests_per_second: f64,

    /// Requests allowed back to back before throttling
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 10.0,
            burst_size: 20,
        }
    }
}

/// Fluent construction of a [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Start from [`ClientConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Bearer credential.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(secret(api_key));
        self
    }

    /// `OpenAI-Organization` header value.
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.config.organization = Some(organization.into());
        self
    }

    /// `OpenAI-Project` header value.
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.config.project = Some(project.into());
        self
    }

    /// API root, e.g. `https://api.openai.com/v1`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// `OpenAI-Beta` header value.
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.config.api_version = Some(api_version.into());
        self
    }

    /// Per-request timeout enforced by the HTTP client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Header added to every request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeaderName`] or [`Error::InvalidHeaderValue`]
    /// when either part is not a legal header.
    pub fn default_header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (key, value) = (key.as_ref(), value.as_ref());
        let name = HeaderName::try_from(key).map_err(|_| Error::InvalidHeaderName(key.into()))?;
        let value =
            HeaderValue::try_from(value).map_err(|_| Error::InvalidHeaderValue(value.into()))?;

        self.config.default_headers.insert(name, value);
        Ok(self)
    }

    /// Proxy URL applied to all schemes.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    /// Throttle with [`RateLimitConfig::default`].
    pub fn with_rate_limiting(self) -> Self {
        self.rate_limit(RateLimitConfig::default())
    }

    /// Throttle with the given token bucket.
    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Pool and keep-alive settings.
    pub fn connection_pool(mut self, config: ConnectionPoolConfig) -> Self {
        self.config.connection_pool = config;
        self
    }

    /// Finish building.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use secrecy::ExposeSecret;

    #[test]
    fn test_defaults_leave_endpoints_unset() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.base_url.is_none());
        assert!(config.api_version.is_none());
        assert!(config.rate_limit.is_none());
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = ClientConfigBuilder::new()
            .api_key("sk-test")
            .project("proj_1")
            .base_url("http://localhost:9000/v1")
            .timeout(Duration::from_secs(5))
            .with_rate_limiting()
            .build();

        assert_eq!(
            config.api_key.as_ref().map(|k| k.expose_secret()),
            Some("sk-test")
        );
        assert_eq!(config.project.as_deref(), Some("proj_1"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.rate_limit.map(|r| r.burst_size), Some(20));
    }

    #[test]
    fn test_builder_rejects_illegal_header() {
        assert_matches!(
            ClientConfigBuilder::new().default_header("x y", "1"),
            Err(Error::InvalidHeaderName(name)) if name == "x y"
        );
        assert_matches!(
            ClientConfigBuilder::new().default_header("x-y", "a\r\nb"),
            Err(Error::InvalidHeaderValue(_))
        );
    }

    #[test]
    fn test_merge_prefers_other_and_combines_headers() {
        let base = ClientConfigBuilder::new()
            .api_key("sk-base")
            .organization("org-base")
            .default_header("x-a", "base")
            .unwrap()
            .default_header("x-b", "base")
            .unwrap()
            .build();
        let overlay = ClientConfigBuilder::new()
            .organization("org-overlay")
            .timeout(Duration::from_secs(3))
            .default_header("x-b", "overlay")
            .unwrap()
            .build();

        let merged = base.merge(overlay);

        assert_eq!(
            merged.api_key.as_ref().map(|k| k.expose_secret()),
            Some("sk-base")
        );
        assert_eq!(merged.organization.as_deref(), Some("org-overlay"));
        assert_eq!(merged.timeout, Duration::from_secs(3));
        assert_eq!(merged.default_headers["x-a"], "base");
        assert_eq!(merged.default_headers["x-b"], "overlay");
    }

    #[test]
    fn test_merge_keeps_custom_timeout_over_default() {
        let base = ClientConfigBuilder::new()
            .timeout(Duration::from_secs(7))
            .build();
        let merged = base.merge(ClientConfig::default());
        assert_eq!(merged.timeout, Duration::from_secs(7));
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env_reads_openai_variables() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-env")),
                ("OPENAI_ORG_ID", Some("org-env")),
                ("OPENAI_PROJECT_ID", Some("")),
                ("OPENAI_BASE_URL", Some("https://proxy.internal/v1")),
                ("OPENAI_BETA_VERSION", Some("assistants=v2")),
                ("OPENAI_TIMEOUT", Some(" 45 ")),
                ("OPENAI_PROXY", None),
            ],
            || {
                let config = ClientConfig::from_env().unwrap();
                assert_eq!(
                    config.api_key.as_ref().map(|k| k.expose_secret()),
                    Some("sk-env")
                );
                assert_eq!(config.organization.as_deref(), Some("org-env"));
                assert!(config.project.is_none());
                assert_eq!(config.base_url.as_deref(), Some("https://proxy.internal/v1"));
                assert_eq!(config.timeout, Duration::from_secs(45));
                assert!(config.proxy.is_none());
            },
        );
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env_rejects_non_numeric_timeout() {
        temp_env::with_var("OPENAI_TIMEOUT", Some("1m"), || {
            assert_matches!(ClientConfig::from_env(), Err(Error::InvalidRequest(_)));
        });
    }
}
