//! Port trait implementation for `WarehouseClient`.
//!
//! This module implements the core-owned `WarehousePort` trait, mapping
//! ClickHouse transport errors onto the core error contract.

use async_trait::async_trait;
use genassoc_core::{Query, Row, WarehouseError, WarehousePort, WarehouseResult};

use crate::client::WarehouseClient;
use crate::error::ClickHouseError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `ClickHouseError` to core `WarehouseError`.
fn map_error(err: ClickHouseError) -> WarehouseError {
    match err {
        ClickHouseError::QueryFailed { status, message } => {
            WarehouseError::Query { status, message }
        }
        ClickHouseError::Timeout => WarehouseError::Timeout,
        ClickHouseError::Network(e) if e.is_timeout() => WarehouseError::Timeout,
        ClickHouseError::Network(e) => WarehouseError::Network {
            message: e.to_string(),
        },
        ClickHouseError::ClientBuild { message } => WarehouseError::Network { message },
        ClickHouseError::InvalidResponse { message } => {
            WarehouseError::InvalidResponse { message }
        }
        ClickHouseError::InvalidUrl(e) => WarehouseError::InvalidResponse {
            message: e.to_string(),
        },
        ClickHouseError::JsonParse(e) => WarehouseError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + 'static> WarehousePort for WarehouseClient<B> {
    async fn query(&self, query: &Query) -> WarehouseResult<Vec<Row>> {
        self.execute(query).await.map_err(map_error)
    }
}
