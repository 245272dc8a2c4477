//! Internal error types for warehouse operations.
//!
//! These errors are mapped to the core `WarehouseError` at the port
//! boundary.

use thiserror::Error;

/// Result type alias for warehouse operations.
pub type ClickHouseResult<T> = Result<T, ClickHouseError>;

/// Errors raised by the ClickHouse HTTP client.
#[derive(Debug, Error)]
pub enum ClickHouseError {
    /// The server rejected the query.
    #[error("Query failed with status {status}: {message}")]
    QueryFailed {
        /// HTTP status code
        status: u16,
        /// First line of the server's exception text
        message: String,
    },

    /// The response body was not the expected `JSONCompact` document.
    #[error("Invalid response from warehouse: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Warehouse request timed out")]
    Timeout,

    /// The HTTP client could not be built.
    #[error("Cannot build HTTP client: {message}")]
    ClientBuild {
        /// Reason reported by the HTTP library
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
