//! Elasticsearch client for windowed boolean searches.

use genassoc_core::{SearchHits, SearchRequest};
use tracing::debug;
use url::Url;

use crate::body::search_body;
use crate::config::SearchClientConfig;
use crate::error::ElasticsearchResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::parsing::parse_hits;

/// Default search client using the reqwest HTTP backend.
pub type DefaultSearchClient = SearchClient<ReqwestBackend>;

/// Client for the `_search` endpoint of an Elasticsearch cluster.
///
/// Generic over an HTTP backend so tests can substitute canned responses.
/// Use `DefaultSearchClient` for production code.
pub struct SearchClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: Url,
}

/// Parse `raw` and make sure its path ends with `/` so index names join
/// beneath it rather than replacing the last segment.
fn base_url(raw: &str) -> ElasticsearchResult<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

impl DefaultSearchClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &SearchClientConfig) -> ElasticsearchResult<Self> {
        Ok(Self {
            base_url: base_url(&config.base_url)?,
            backend: ReqwestBackend::new(config)?,
        })
    }
}

impl<B: HttpBackend> SearchClient<B> {
    #[cfg(test)]
    pub(crate) fn with_backend(base: &str, backend: B) -> Self {
        Self {
            backend,
            base_url: base_url(base).unwrap(),
        }
    }

    fn search_url(&self, index: &str) -> ElasticsearchResult<Url> {
        Ok(self.base_url.join(&format!("{index}/_search"))?)
    }

    pub(crate) async fn execute(&self, request: &SearchRequest) -> ElasticsearchResult<SearchHits> {
        let url = self.search_url(&request.index)?;
        let body = search_body(request);
        let response = self.backend.post_json(&url, &body).await?;
        let hits = parse_hits(response)?;
        debug!(index = %request.index, total = hits.total, returned = hits.documents.len(), "Search completed");
        Ok(hits)
    }
}
