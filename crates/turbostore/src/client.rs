//! Main client implementation for the vector store API

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::{
    config::{ClientConfig, ClientConfigBuilder},
    error::Result,
    http::{Dispatcher, HttpProvider, OpenAIHttpProvider},
    resources::VectorStores,
};

/// Main client for the vector store API.
///
/// Cheap to clone and safe to share across tasks; the configuration is fixed
/// once built.
///
/// # Example
///
/// ```rust,no_run
/// use turbostore::Client;
///
/// let client = Client::new("sk-...");
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    dispatcher: Dispatcher,
    vector_stores: OnceLock<VectorStores>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("dispatcher", &self.inner.dispatcher)
            .finish()
    }
}

impl Client {
    /// Create a new client with an API key and default settings.
    ///
    /// # Panics
    ///
    /// This convenience method panics if the client cannot be built with the default
    /// configuration, e.g. when the TLS backend cannot be initialized. For fallible
    /// construction use [`Client::try_new()`] instead.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::try_new(api_key).expect("Failed to build client with provided API key")
    }

    /// Create a new client with an API key (fallible version).
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use turbostore::Client;
    ///
    /// let client = Client::try_new("sk-...").expect("Failed to create client");
    /// ```
    pub fn try_new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client sending through a custom HTTP provider.
    ///
    /// The provider owns credentials; the client only adds the base URL and
    /// protocol version header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) if `base_url` is empty or not `http`/`https`.
    pub fn from_provider(provider: Arc<dyn HttpProvider>, base_url: &str) -> Result<Self> {
        let dispatcher = Dispatcher::new(provider, base_url, crate::DEFAULT_API_VERSION)?;
        Ok(Self::from_dispatcher(dispatcher))
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, no API key can be found,
    /// or the HTTP client cannot be created.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::from_parts(config, None)
    }

    fn from_parts(config: ClientConfig, provider: Option<Arc<dyn HttpProvider>>) -> Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| crate::DEFAULT_BASE_URL.to_string());
        let api_version = config
            .api_version
            .clone()
            .unwrap_or_else(|| crate::DEFAULT_API_VERSION.to_string());

        let provider = match provider {
            Some(provider) => provider,
            None => Arc::new(build_provider(config)?),
        };

        let dispatcher = Dispatcher::new(provider, &base_url, &api_version)?;
        Ok(Self::from_dispatcher(dispatcher))
    }

    fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                dispatcher,
                vector_stores: OnceLock::new(),
            }),
        }
    }

    /// Access the vector stores API.
    pub fn vector_stores(&self) -> &VectorStores {
        self.inner
            .vector_stores
            .get_or_init(|| VectorStores::new(self.inner.dispatcher.clone()))
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.inner.dispatcher.base_url()
    }

    /// The protocol version header value.
    pub fn api_version(&self) -> &str {
        self.inner.dispatcher.api_version()
    }

    /// Get the provider name (for debugging).
    pub fn provider_name(&self) -> &'static str {
        self.inner.dispatcher.provider_name()
    }
}

fn build_provider(config: ClientConfig) -> Result<OpenAIHttpProvider> {
    let mut provider_builder = OpenAIHttpProvider::builder();

    if let Some(api_key) = config.api_key {
        provider_builder = provider_builder.api_key_secret(api_key);
    }
    if let Some(organization) = config.organization {
        provider_builder = provider_builder.organization(organization);
    }
    if let Some(project) = config.project {
        provider_builder = provider_builder.project(project);
    }
    if let Some(proxy) = config.proxy {
        provider_builder = provider_builder.proxy(proxy);
    }
    if let Some(rate_limit) = config.rate_limit {
        provider_builder = provider_builder.rate_limit(rate_limit);
    }

    provider_builder
        .timeout(config.timeout)
        .connection_pool(config.connection_pool)
        .headers(&config.default_headers)
        .build()
}

/// Builder for a [`Client`].
///
/// Wraps a [`ClientConfigBuilder`] and optionally a custom provider.
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfigBuilder,
    provider: Option<Arc<dyn HttpProvider>>,
}

impl ClientBuilder {
    /// Start from an existing configuration, e.g. [`ClientConfig::from_env`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = ClientConfigBuilder::from_config(config);
        self
    }

    /// Adjust the configuration in place.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use turbostore::Client;
    ///
    /// let client = Client::builder()
    ///     .api_key("sk-...")
    ///     .configure(|c| c.organization("org-1").timeout(Duration::from_secs(20)))
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn configure(
        mut self,
        f: impl FnOnce(ClientConfigBuilder) -> ClientConfigBuilder,
    ) -> Self {
        self.config = f(self.config);
        self
    }

    /// Bearer credential.
    pub fn api_key(self, api_key: impl Into<String>) -> Self {
        self.configure(|c| c.api_key(api_key))
    }

    /// API root, e.g. a mock server URI in tests.
    pub fn base_url(self, base_url: impl Into<String>) -> Self {
        self.configure(|c| c.base_url(base_url))
    }

    /// `OpenAI-Beta` header value.
    pub fn api_version(self, api_version: impl Into<String>) -> Self {
        self.configure(|c| c.api_version(api_version))
    }

    /// Per-request timeout enforced by the HTTP client.
    pub fn timeout(self, timeout: Duration) -> Self {
        self.configure(|c| c.timeout(timeout))
    }

    /// Send through a custom provider instead of the default `reqwest` one.
    ///
    /// Credential, proxy, pool and rate limit settings are ignored; the
    /// provider owns them.
    pub fn provider(mut self, provider: Arc<dyn HttpProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, no API key can be found,
    /// or the HTTP client cannot be created.
    pub fn build(self) -> Result<Client> {
        Client::from_parts(self.config.build(), self.provider)
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config", &self.config)
            .field("custom_provider", &self.provider.is_some())
            .finish()
    }
}
