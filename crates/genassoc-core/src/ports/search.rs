//! Full-text search port.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::pagination::SearchWindow;
use crate::ports::warehouse::DecodeError;

/// One `should` clause of a boolean search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchClause {
    /// Case-insensitive prefix match on a keyword field.
    Prefix { field: String, value: String },
    /// Analyzed free-text match over several fields.
    FreeText { fields: Vec<String>, query: String },
}

impl SearchClause {
    #[must_use]
    pub fn prefix(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Prefix {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn free_text(fields: &[&str], query: impl Into<String>) -> Self {
        Self::FreeText {
            fields: fields.iter().map(|f| (*f).to_string()).collect(),
            query: query.into(),
        }
    }
}

/// A boolean-should query against one index, windowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub index: String,
    pub should: Vec<SearchClause>,
    pub window: SearchWindow,
}

/// Total hit count plus the raw documents of the requested window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    pub total: u64,
    pub documents: Vec<Value>,
}

/// Errors from search port operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search engine unreachable: {message}")]
    Network { message: String },

    #[error("Search request timed out")]
    Timeout,

    #[error("Search engine rejected request on '{index}' (status {status}): {message}")]
    Rejected {
        index: String,
        status: u16,
        message: String,
    },

    #[error("Invalid search response: {message}")]
    InvalidResponse { message: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub type SearchResult<T> = Result<T, SearchError>;

/// Port for running windowed searches against a full-text index.
#[async_trait]
pub trait SearchPort: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchHits>;
}
