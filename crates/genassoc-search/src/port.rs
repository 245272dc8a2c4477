//! Port trait implementation for `SearchClient`.

use async_trait::async_trait;
use genassoc_core::{SearchError, SearchHits, SearchPort, SearchRequest, SearchResult};

use crate::client::SearchClient;
use crate::error::ElasticsearchError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `ElasticsearchError` to core `SearchError`.
fn map_error(index: &str, err: ElasticsearchError) -> SearchError {
    match err {
        ElasticsearchError::RequestFailed { status, message } => SearchError::Rejected {
            index: index.to_string(),
            status,
            message,
        },
        ElasticsearchError::Timeout => SearchError::Timeout,
        ElasticsearchError::Network(e) if e.is_timeout() => SearchError::Timeout,
        ElasticsearchError::Network(e) => SearchError::Network {
            message: e.to_string(),
        },
        ElasticsearchError::ClientBuild { message } => SearchError::Network { message },
        ElasticsearchError::InvalidResponse { message } => SearchError::InvalidResponse { message },
        ElasticsearchError::InvalidUrl(e) => SearchError::InvalidResponse {
            message: e.to_string(),
        },
        ElasticsearchError::JsonParse(e) => SearchError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + 'static> SearchPort for SearchClient<B> {
    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchHits> {
        self.execute(request)
            .await
            .map_err(|e| map_error(&request.index, e))
    }
}
