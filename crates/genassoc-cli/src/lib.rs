//! Command-line adapter for the genassoc backend.
//!
//! `main.rs` parses arguments, calls [`bootstrap`] to wire the ClickHouse
//! and Elasticsearch adapters into a [`genassoc_core::Backend`], then hands
//! the command to [`handlers::execute`], which prints JSON on stdout.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the main.rs binary and unit tests
use anyhow as _;
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, PageArgs};
pub use error::CliError;
pub use parser::Cli;
