//! Common test utilities.
//!
//! In-memory fakes of the warehouse and search ports, plus row fixtures.

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;
