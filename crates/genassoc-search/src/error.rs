//! Internal error types for search operations.
//!
//! These errors are mapped to the core `SearchError` at the port boundary.

use thiserror::Error;

pub type ElasticsearchResult<T> = Result<T, ElasticsearchError>;

/// Errors raised by the Elasticsearch HTTP client.
#[derive(Debug, Error)]
pub enum ElasticsearchError {
    /// The cluster answered with a non-success status.
    #[error("Search request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Invalid response from search engine: {message}")]
    InvalidResponse { message: String },

    #[error("Search request timed out")]
    Timeout,

    #[error("Cannot build HTTP client: {message}")]
    ClientBuild { message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
