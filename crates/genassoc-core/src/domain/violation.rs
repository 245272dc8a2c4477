//! Input validation failures.

use thiserror::Error;

/// Why a raw client input was rejected.
///
/// Violations are raised before any storage access and are the only
/// failures that the per-identifier views surface to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Invalid variant id '{input}': expected CHR_POSITION_REF_ALT")]
    InvalidVariant { input: String },

    #[error("Invalid gene id '{input}': expected an Ensembl gene identifier")]
    InvalidGene { input: String },

    #[error("Invalid chromosome '{input}': expected 1-22, X, Y or MT")]
    InvalidChromosome { input: String },

    #[error("Invalid region {start}-{end}: bounds must be non-negative, ordered and within the maximum window")]
    InvalidRegion { start: i64, end: i64 },

    #[error("Search query must not be empty")]
    EmptySearchQuery { input: String },

    #[error("Invalid study id '{input}'")]
    InvalidStudy { input: String },
}

impl Violation {
    /// Machine-readable code for this violation.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidVariant { .. } => "INVALID_VARIANT",
            Self::InvalidGene { .. } => "INVALID_GENE",
            Self::InvalidChromosome { .. } => "INVALID_CHROMOSOME",
            Self::InvalidRegion { .. } => "INVALID_REGION",
            Self::EmptySearchQuery { .. } => "EMPTY_SEARCH_QUERY",
            Self::InvalidStudy { .. } => "INVALID_STUDY",
        }
    }

    /// The offending raw input, rendered as text.
    #[must_use]
    pub fn input(&self) -> String {
        match self {
            Self::InvalidVariant { input }
            | Self::InvalidGene { input }
            | Self::InvalidChromosome { input }
            | Self::EmptySearchQuery { input }
            | Self::InvalidStudy { input } => input.clone(),
            Self::InvalidRegion { start, end } => format!("{start}-{end}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        let violation = Violation::InvalidGene {
            input: "x".to_string(),
        };
        assert_eq!(violation.kind(), "INVALID_GENE");

        let violation = Violation::InvalidRegion { start: 5, end: 1 };
        assert_eq!(violation.kind(), "INVALID_REGION");
        assert_eq!(violation.input(), "5-1");
    }

    #[test]
    fn test_display_mentions_input() {
        let violation = Violation::InvalidVariant {
            input: "1_abc".to_string(),
        };
        assert!(violation.to_string().contains("1_abc"));
    }
}
