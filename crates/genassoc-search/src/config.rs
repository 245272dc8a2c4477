//! Public configuration for the search client.

use std::time::Duration;

/// Configuration for the Elasticsearch HTTP client.
///
/// # Example
///
/// ```
/// use genassoc_search::SearchClientConfig;
/// use std::time::Duration;
///
/// let config = SearchClientConfig::new()
///     .with_base_url("http://elasticsearch:9200")
///     .with_timeout(Duration::from_secs(10))
///     .with_max_retries(1);
/// ```
#[derive(Debug, Clone)]
pub struct SearchClientConfig {
    /// Base URL of the cluster
    pub(crate) base_url: String,
    /// Basic-auth user
    pub(crate) user: Option<String>,
    /// Basic-auth password
    pub(crate) password: Option<String>,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for SearchClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9200".to_string(),
            user: None,
            password: None,
            user_agent: concat!("genassoc-search/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(250),
        }
    }
}

impl SearchClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cluster base URL.
    ///
    /// Defaults to `http://localhost:9200`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for transient errors.
    ///
    /// Defaults to 3.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}
