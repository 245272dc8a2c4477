//! Port fakes with canned answers and call counters.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use genassoc_core::ports::{SearchResult, WarehouseResult};
use genassoc_core::{
    Query, Row, SearchError, SearchHits, SearchPort, SearchRequest, WarehouseError, WarehousePort,
};

/// Warehouse fake answering every query with the same canned result.
pub struct FakeWarehouse {
    answer: Result<Vec<Row>, String>,
    calls: AtomicUsize,
    queries: Mutex<Vec<Query>>,
}

impl FakeWarehouse {
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            answer: Ok(rows),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Every query fails with a network error.
    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<Query> {
        self.queries.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl WarehousePort for FakeWarehouse {
    async fn query(&self, query: &Query) -> WarehouseResult<Vec<Row>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        match &self.answer {
            Ok(rows) => Ok(rows.clone()),
            Err(message) => Err(WarehouseError::Network {
                message: message.clone(),
            }),
        }
    }
}

/// Search fake keyed by index name. Unknown indices return no hits; indices
/// listed in `failing` return an error.
#[derive(Default)]
pub struct FakeSearch {
    hits: HashMap<String, SearchHits>,
    failing: Vec<String>,
    calls: AtomicUsize,
    requests: Mutex<Vec<SearchRequest>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hits(mut self, index: &str, hits: SearchHits) -> Self {
        self.hits.insert(index.to_string(), hits);
        self
    }

    #[must_use]
    pub fn failing_on(mut self, index: &str) -> Self {
        self.failing.push(index.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchPort for FakeSearch {
    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchHits> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        // Let the other branches of a concurrent fan-out run first.
        tokio::task::yield_now().await;

        if self.failing.contains(&request.index) {
            return Err(SearchError::Rejected {
                index: request.index.clone(),
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        Ok(self.hits.get(&request.index).cloned().unwrap_or_default())
    }
}
