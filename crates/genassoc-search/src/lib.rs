#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultSearchClient is meant to be used through the SearchPort trait,
// not its internal generic structure
#![allow(private_interfaces)]

mod body;
mod client;
mod config;
mod error;
mod http;
mod parsing;
mod port;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DefaultSearchClient, SearchClient};

// Configuration
pub use config::SearchClientConfig;

// Errors raised while building a client
pub use error::ElasticsearchError;
