//! Port definitions (trait abstractions) for the storage collaborators.
//!
//! Ports define what the core expects from the warehouse and the search
//! engine. They contain no transport details and use only core types.
//!
//! # Design Rules
//!
//! - No HTTP or driver types in any signature
//! - Query text and bound parameters travel separately
//! - Adapters map their internal errors to the port error types

pub mod search;
pub mod warehouse;

pub use search::{SearchClause, SearchError, SearchHits, SearchPort, SearchRequest, SearchResult};
pub use warehouse::{
    DecodeError, Query, QueryParam, Row, WarehouseError, WarehousePort, WarehouseResult,
};
