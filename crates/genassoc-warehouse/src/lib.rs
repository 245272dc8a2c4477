#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultWarehouseClient is meant to be used through the WarehousePort
// trait, not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod parsing;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultWarehouseClient, WarehouseClient};

// Configuration
pub use config::WarehouseClientConfig;

// Errors raised while building a client
pub use error::ClickHouseError;
