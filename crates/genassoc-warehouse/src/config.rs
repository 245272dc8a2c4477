//! Public configuration for the warehouse client.

use std::time::Duration;

/// Configuration for the ClickHouse HTTP client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use genassoc_warehouse::WarehouseClientConfig;
/// use std::time::Duration;
///
/// let config = WarehouseClientConfig::new()
///     .with_base_url("http://clickhouse:8123")
///     .with_credentials("reader", "secret")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct WarehouseClientConfig {
    /// Base URL of the HTTP interface
    pub(crate) base_url: String,
    /// Default database for unqualified table names
    pub(crate) database: Option<String>,
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

impl Default for WarehouseClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8123".to_string(),
            database: None,
            user: None,
            password: None,
            user_agent: concat!("genassoc-warehouse/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(250),
        }
    }
}

impl WarehouseClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the HTTP interface.
    ///
    /// Defaults to `http://localhost:8123`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Authenticate every request with HTTP basic auth.
    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Set optional credentials; a password without a user is ignored.
    #[must_use]
    pub fn with_optional_credentials(
        mut self,
        user: Option<String>,
        password: Option<String>,
    ) -> Self {
        self.password = user.as_ref().and(password);
        self.user = user;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 3 retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 250ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WarehouseClientConfig::new();
        assert_eq!(config.base_url, "http://localhost:8123");
        assert!(config.user_agent.contains("genassoc-warehouse"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user.is_none());
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_builder_pattern() {
        let config = WarehouseClientConfig::new()
            .with_base_url("https://warehouse.internal:8443")
            .with_database("ot")
            .with_credentials("reader", "secret")
            .with_timeout(Duration::from_secs(5))
            .with_max_retries(0);

        assert_eq!(config.base_url, "https://warehouse.internal:8443");
        assert_eq!(config.database.as_deref(), Some("ot"));
        assert_eq!(config.user.as_deref(), Some("reader"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_optional_credentials() {
        let config = WarehouseClientConfig::new()
            .with_optional_credentials(Some("reader".to_string()), Some("pw".to_string()));
        assert_eq!(config.password.as_deref(), Some("pw"));

        let config = WarehouseClientConfig::new()
            .with_optional_credentials(None, Some("pw".to_string()));
        assert!(config.user.is_none());
        assert!(config.password.is_none());
    }
}
