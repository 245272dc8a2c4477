//! ClickHouse client for running parameterised read-only queries.

use genassoc_core::{Query, Row};
use tracing::debug;
use url::Url;

use crate::config::WarehouseClientConfig;
use crate::error::{ClickHouseError, ClickHouseResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::parsing::parse_compact_rows;
use crate::url::build_query_url;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default warehouse client using the reqwest HTTP backend.
pub type DefaultWarehouseClient = WarehouseClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the ClickHouse HTTP interface.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultWarehouseClient` for production code.
pub struct WarehouseClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: Url,
    pub(crate) database: Option<String>,
}

impl DefaultWarehouseClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails when the base URL does not parse or the HTTP client cannot be
    /// built.
    pub fn new(config: &WarehouseClientConfig) -> ClickHouseResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let backend = ReqwestBackend::new(config)?;
        Ok(Self {
            backend,
            base_url,
            database: config.database.clone(),
        })
    }
}

impl<B: HttpBackend> WarehouseClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(base_url: &str, database: Option<&str>, backend: B) -> Self {
        Self {
            backend,
            base_url: Url::parse(base_url).unwrap(),
            database: database.map(str::to_string),
        }
    }

    /// Run `query` and return its rows in server order.
    pub(crate) async fn execute(&self, query: &Query) -> ClickHouseResult<Vec<Row>> {
        let url = build_query_url(&self.base_url, self.database.as_deref(), query);
        let body = self.backend.post_query(&url, query.sql()).await?;
        let rows = parse_compact_rows(&body)?;
        debug!(rows = rows.len(), "Warehouse query returned");
        Ok(rows)
    }
}
