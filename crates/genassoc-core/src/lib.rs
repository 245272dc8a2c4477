#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod error;
pub mod mapper;
pub mod pagination;
pub mod ports;
pub mod query;
pub mod services;

pub use config::{BackendConfig, ConfigError, PaginationLimits, SearchIndices, TableNames};
pub use domain::{
    Chromosome, GeckoLine, Gene, G2VSchema, G2VTable, IndexVariantTable, ManhattanTable,
    PhewasTable, Position, Region, SearchResultSet, Study, TagVariantTable, Variant, Violation,
};
pub use error::{BackendError, BackendResult};
pub use mapper::GeckoLines;
pub use pagination::{PageRequest, Paginator, SearchWindow, WarehousePage};
pub use ports::{
    DecodeError, Query, QueryParam, Row, SearchClause, SearchError, SearchHits, SearchPort,
    SearchRequest, SearchResult, WarehouseError, WarehousePort, WarehouseResult,
};
pub use query::QueryBuilder;
pub use services::{Backend, SearchAggregator};

// Dev-dependencies used only by integration tests
#[cfg(test)]
use proptest as _;
#[cfg(test)]
use tokio_test as _;
