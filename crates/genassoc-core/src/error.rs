//! Failure contract of the backend facade.

use thiserror::Error;

use crate::domain::Violation;
use crate::ports::{SearchError, WarehouseError};

/// Errors surfaced by [`Backend`](crate::services::Backend) operations.
///
/// Per-identifier views only ever fail with [`BackendError::Violation`];
/// storage failures are absorbed into empty results. Search and study-id
/// validation propagate storage failures.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Violation(#[from] Violation),

    #[error("Unknown study: {0}")]
    UnknownStudy(String),

    #[error("Warehouse error: {0}")]
    Warehouse(#[from] WarehouseError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),
}

impl BackendError {
    /// True for failures caused by client input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Violation(_) | Self::UnknownStudy(_))
    }
}

pub type BackendResult<T> = Result<T, BackendError>;
