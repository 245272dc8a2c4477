//! HTTP backend abstraction for the search cluster.
//!
//! The production implementation uses reqwest with automatic retry logic
//! for transient errors.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::SearchClientConfig;
use crate::error::{ElasticsearchError, ElasticsearchResult};
use crate::parsing::summarize_error;

/// Trait for HTTP backends that post a JSON body and return a JSON body.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn post_json(&self, url: &Url, body: &Value) -> ElasticsearchResult<Value>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
    credentials: Option<(String, Option<String>)>,
}

impl ReqwestBackend {
    pub fn new(config: &SearchClientConfig) -> ElasticsearchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ElasticsearchError::ClientBuild {
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

    fn build_request(&self, url: &Url, body: &Value) -> reqwest::RequestBuilder {
        let mut request = self.client.post(url.as_str()).json(body);
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, password.as_ref());
        }
        request
    }

    /// Post with automatic retry for transient errors.
    async fn post_with_retry(
        &self,
        url: &Url,
        body: &Value,
    ) -> ElasticsearchResult<reqwest::Response> {
        let mut last_error: Option<ElasticsearchError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(
                    self.retry_base_delay_ms * 2u64.pow(u32::from(attempt) - 1),
                );
                debug!(attempt, delay_ms = delay.as_millis(), %url, "Retrying search request");
                tokio::time::sleep(delay).await;
            }

            match self.build_request(url, body).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    let message = summarize_error(&response.text().await.unwrap_or_default());
                    let error = ElasticsearchError::RequestFailed {
                        status: status.as_u16(),
                        message,
                    };

                    // 5xx and 429 are retryable
                    let retryable = status.is_server_error() || status.as_u16() == 429;
                    if retryable && attempt < self.max_retries {
                        last_error = Some(error);
                        continue;
                    }
                    return Err(error);
                }
                Err(e) => {
                    let error = if e.is_timeout() {
                        ElasticsearchError::Timeout
                    } else {
                        e.into()
                    };
                    if attempt < self.max_retries {
                        last_error = Some(error);
                        continue;
                    }
                    return Err(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ElasticsearchError::InvalidResponse {
            message: "Unknown error during search".to_string(),
        }))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json(&self, url: &Url, body: &Value) -> ElasticsearchResult<Value> {
        let response = self.post_with_retry(url, body).await?;
        Ok(response.json().await?)
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
        pub json: Value,
    }

    impl CannedResponse {
        pub const fn ok(json: Value) -> Self {
            Self { status: 200, json }
        }
    }

    /// A fake HTTP backend keyed by URL path substring.
    pub struct FakeBackend {
        responses: Vec<(String, CannedResponse)>,
        requests: Arc<Mutex<Vec<(Url, Value)>>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self {
                responses: Vec::new(),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Add a canned response for URLs whose path contains `path_contains`.
        pub fn with_response(mut self, path_contains: &str, response: CannedResponse) -> Self {
            self.responses.push((path_contains.to_string(), response));
            self
        }

        pub fn requests(&self) -> Arc<Mutex<Vec<(Url, Value)>>> {
            Arc::clone(&self.requests)
        }
    }

    impl Default for FakeBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn post_json(&self, url: &Url, body: &Value) -> ElasticsearchResult<Value> {
            self.requests
                .lock()
                .unwrap()
                .push((url.clone(), body.clone()));

            let response = self
                .responses
                .iter()
                .find(|(pattern, _)| url.path().contains(pattern.as_str()))
                .map(|(_, response)| response.clone())
                .ok_or_else(|| ElasticsearchError::RequestFailed {
                    status: 404,
                    message: format!("index_not_found_exception: {}", url.path()),
                })?;

            if response.status >= 400 {
                return Err(ElasticsearchError::RequestFailed {
                    status: response.status,
                    message: summarize_error(&response.json.to_string()),
                });
            }
            Ok(response.json)
        }
    }
}
