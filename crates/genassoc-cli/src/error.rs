//! CLI-specific error types and mappings.
//!
//! Maps backend and adapter errors to exit codes and user-facing messages.

use genassoc_core::{BackendError, ConfigError};
use genassoc_search::ElasticsearchError;
use genassoc_warehouse::ClickHouseError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected client input.
    #[error("{kind}: {message}")]
    Usage { kind: &'static str, message: String },

    /// A store could not answer.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (config file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Result could not be rendered.
    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 2: Misuse (invalid input)
    /// - 69: `EX_UNAVAILABLE`
    /// - 70: `EX_SOFTWARE`
    /// - 74: `EX_IOERR`
    /// - 78: `EX_CONFIG`
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } => 2,
            Self::Unavailable(_) => 69,
            Self::Output(_) => 70,
            Self::Io(_) => 74,
            Self::Config(_) => 78,
        }
    }
}

impl From<BackendError> for CliError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Violation(violation) => Self::Usage {
                kind: violation.kind(),
                message: violation.to_string(),
            },
            BackendError::UnknownStudy(study_id) => Self::Usage {
                kind: "UNKNOWN_STUDY",
                message: format!("no study with id '{study_id}'"),
            },
            BackendError::Warehouse(e) => Self::Unavailable(e.to_string()),
            BackendError::Search(e) => Self::Unavailable(e.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<ClickHouseError> for CliError {
    fn from(err: ClickHouseError) -> Self {
        Self::Config(format!("warehouse client: {err}"))
    }
}

impl From<ElasticsearchError> for CliError {
    fn from(err: ElasticsearchError) -> Self {
        Self::Config(format!("search client: {err}"))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genassoc_core::{SearchError, Violation, WarehouseError};

    #[test]
    fn test_violation_is_usage_error() {
        let err: CliError = BackendError::from(Violation::InvalidRegion { start: 10, end: 1 }).into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().starts_with("INVALID_REGION:"));
    }

    #[test]
    fn test_unknown_study_is_usage_error() {
        let err: CliError = BackendError::UnknownStudy("GCST0".to_string()).into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("GCST0"));
    }

    #[test]
    fn test_store_failures_are_unavailable() {
        let warehouse: CliError = BackendError::from(WarehouseError::Timeout).into();
        let search: CliError = BackendError::from(SearchError::Timeout).into();
        assert_eq!(warehouse.exit_code(), 69);
        assert_eq!(search.exit_code(), 69);
    }

    #[test]
    fn test_config_errors() {
        let err: CliError = ConfigError::InvalidLimit {
            name: "default_size",
            message: "must be greater than 0".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 78);
    }
}
