//! OpenAgenda client configuration.

use std::time::Duration;

use url::Url;

/// Configuration for the OpenAgenda API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Public API key identifying the consumer.
    ///
    /// Sent as the `key` query parameter on every request unless the caller
    /// already provided one.
    pub public_key: String,

    /// Base URL of the API.
    ///
    /// Defaults to [`ClientConfig::DEFAULT_BASE_URL`]; override it to point
    /// the client at a staging deployment.
    pub base_url: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string for API requests.
    pub user_agent: String,

    /// Proxy URL applied to all requests, if set.
    pub proxy: Option<String>,
}

impl ClientConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default base URL of the OpenAgenda v2 API.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openagenda.com/v2/";

    /// Creates a new configuration with the given public key.
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("openagenda-rs/{}", env!("CARGO_PKG_VERSION")),
            proxy: None,
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets a proxy URL for all requests.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.public_key.is_empty() {
            return Err("public key is required".to_string());
        }

        Url::parse(&self.base_url).map_err(|e| format!("invalid base URL: {}", e))?;

        if let Some(ref proxy) = self.proxy {
            Url::parse(proxy).map_err(|e| format!("invalid proxy URL: {}", e))?;
        }

        Ok(())
    }
}
