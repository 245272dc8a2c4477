//! HTTP backend abstraction for the ClickHouse interface.
//!
//! The production implementation uses reqwest with automatic retry logic
//! for transient errors.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::config::WarehouseClientConfig;
use crate::error::{ClickHouseError, ClickHouseResult};
use crate::parsing::summarize_exception;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can post a query and return the body.
///
/// This is an implementation detail - external code should use the
/// `WarehousePort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Post `sql` to `url` and return the successful response body.
    async fn post_query(&self, url: &Url, sql: &str) -> ClickHouseResult<String>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Implements exponential backoff for transient server errors (5xx)
/// and network errors.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
    credentials: Option<(String, Option<String>)>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &WarehouseClientConfig) -> ClickHouseResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClickHouseError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            #[allow(clippy::cast_possible_truncation)] // Duration milliseconds won't exceed u64 in practice
            retry_base_delay_ms: config.retry_base_delay.as_millis() as u64,
            credentials: config
                .user
                .clone()
                .map(|user| (user, config.password.clone())),
        })
    }

    /// Build a request with optional authentication.
    fn build_request(&self, url: &Url, sql: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.post(url.as_str()).body(sql.to_string());
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, password.as_ref());
        }
        request
    }

    /// Post a query with automatic retry for transient errors.
    async fn post_with_retry(&self, url: &Url, sql: &str) -> ClickHouseResult<reqwest::Response> {
        let mut last_error: Option<ClickHouseError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(
                    self.retry_base_delay_ms * 2u64.pow(u32::from(attempt) - 1),
                );
                debug!(attempt, delay_ms = delay.as_millis(), "Retrying warehouse query");
                tokio::time::sleep(delay).await;
            }

            match self.build_request(url, sql).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    let message = summarize_exception(&response.text().await.unwrap_or_default());
                    let error = ClickHouseError::QueryFailed {
                        status: status.as_u16(),
                        message,
                    };

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(error);
                        continue;
                    }

                    // 4xx errors or final attempt - fail immediately
                    return Err(error);
                }
                Err(e) => {
                    let error = if e.is_timeout() {
                        ClickHouseError::Timeout
                    } else {
                        e.into()
                    };
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        last_error = Some(error);
                        continue;
                    }
                    return Err(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ClickHouseError::InvalidResponse {
            message: "Unknown error during query".to_string(),
        }))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_query(&self, url: &Url, sql: &str) -> ClickHouseResult<String> {
        let response = self.post_with_retry(url, sql).await?;
        Ok(response.text().await?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Canned response for the fake backend.
    #[derive(Clone)]
    pub struct CannedResponse {
        pub status: u16,
        pub body: String,
    }

    impl CannedResponse {
        pub fn ok(body: impl Into<String>) -> Self {
            Self {
                status: 200,
                body: body.into(),
            }
        }
    }

    /// A recorded request.
    #[derive(Clone, Debug)]
    pub struct RecordedRequest {
        pub url: Url,
        pub sql: String,
    }

    /// A fake HTTP backend that returns canned responses keyed by a
    /// substring of the query text.
    pub struct FakeBackend {
        responses: Vec<(String, CannedResponse)>,
        default_response: Option<CannedResponse>,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl FakeBackend {
        /// Create a new fake backend.
        pub fn new() -> Self {
            Self {
                responses: Vec::new(),
                default_response: None,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Add a canned response for queries containing `sql_contains`.
        pub fn with_response(mut self, sql_contains: &str, response: CannedResponse) -> Self {
            self.responses.push((sql_contains.to_string(), response));
            self
        }

        /// Set a default response for queries that match no pattern.
        pub fn with_default(mut self, response: CannedResponse) -> Self {
            self.default_response = Some(response);
            self
        }

        /// Handle for inspecting requests after the backend has moved.
        pub fn requests(&self) -> Arc<Mutex<Vec<RecordedRequest>>> {
            Arc::clone(&self.requests)
        }

        fn find_response(&self, sql: &str) -> Option<CannedResponse> {
            self.responses
                .iter()
                .find(|(pattern, _)| sql.contains(pattern.as_str()))
                .map(|(_, response)| response.clone())
                .or_else(|| self.default_response.clone())
        }
    }

    impl Default for FakeBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn post_query(&self, url: &Url, sql: &str) -> ClickHouseResult<String> {
            self.requests.lock().unwrap().push(RecordedRequest {
                url: url.clone(),
                sql: sql.to_string(),
            });

            let response = self
                .find_response(sql)
                .ok_or_else(|| ClickHouseError::QueryFailed {
                    status: 404,
                    message: "Code: 60. DB::Exception: Unknown table".to_string(),
                })?;

            if response.status >= 400 {
                return Err(ClickHouseError::QueryFailed {
                    status: response.status,
                    message: summarize_exception(&response.body),
                });
            }
            Ok(response.body)
        }
    }
}
