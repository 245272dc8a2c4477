//! Backend configuration.
//!
//! Physical table, dictionary and index names are injected here and referred
//! to elsewhere only by logical role. Because they are interpolated into
//! query text, [`BackendConfig::validate`] restricts them to plain
//! identifiers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default page size when a request does not specify one.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Default maximum span of a regional query, in base pairs.
pub const DEFAULT_MAX_REGION_WINDOW: u64 = 2_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid identifier for {role}: '{value}'")]
    InvalidIdentifier { role: &'static str, value: String },

    #[error("Invalid limit {name}: {message}")]
    InvalidLimit { name: &'static str, message: String },
}

/// Physical names of the warehouse tables, keyed by logical role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableNames {
    /// Prefix of the per-chromosome summary statistics tables; the
    /// chromosome is appended (`..._chr_7`).
    pub summary_stats_by_chromosome: String,
    pub variant_to_disease_by_study: String,
    pub variant_to_disease_by_position: String,
    pub disease_to_variant_to_gene: String,
    pub disease_to_variant_to_gene_overall_score: String,
    pub variant_to_gene: String,
    pub variant_to_gene_overall_score: String,
    pub variant_to_gene_structure: String,
    pub studies: String,
    /// Key-value dictionary holding gene attributes, keyed by gene id.
    pub gene_dictionary: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            summary_stats_by_chromosome: "ot.sumstats_gwas_chr_".to_string(),
            variant_to_disease_by_study: "ot.v2d_by_stchr".to_string(),
            variant_to_disease_by_position: "ot.v2d_by_chrpos".to_string(),
            disease_to_variant_to_gene: "ot.d2v2g".to_string(),
            disease_to_variant_to_gene_overall_score: "ot.d2v2g_score_by_overall".to_string(),
            variant_to_gene: "ot.v2g".to_string(),
            variant_to_gene_overall_score: "ot.v2g_score_by_overall".to_string(),
            variant_to_gene_structure: "ot.v2g_structure".to_string(),
            studies: "ot.studies".to_string(),
            gene_dictionary: "ot.gene".to_string(),
        }
    }
}

impl TableNames {
    fn entries(&self) -> [(&'static str, &str); 10] {
        [
            ("summary_stats_by_chromosome", &self.summary_stats_by_chromosome),
            ("variant_to_disease_by_study", &self.variant_to_disease_by_study),
            (
                "variant_to_disease_by_position",
                &self.variant_to_disease_by_position,
            ),
            ("disease_to_variant_to_gene", &self.disease_to_variant_to_gene),
            (
                "disease_to_variant_to_gene_overall_score",
                &self.disease_to_variant_to_gene_overall_score,
            ),
            ("variant_to_gene", &self.variant_to_gene),
            (
                "variant_to_gene_overall_score",
                &self.variant_to_gene_overall_score,
            ),
            ("variant_to_gene_structure", &self.variant_to_gene_structure),
            ("studies", &self.studies),
            ("gene_dictionary", &self.gene_dictionary),
        ]
    }
}

/// Search index names for the three search categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchIndices {
    pub studies: String,
    /// May be a wildcard pattern over per-chromosome indices.
    pub variants: String,
    pub genes: String,
}

impl Default for SearchIndices {
    fn default() -> Self {
        Self {
            studies: "studies".to_string(),
            variants: "variant_*".to_string(),
            genes: "genes".to_string(),
        }
    }
}

/// Page size bounds for both storage forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationLimits {
    pub default_size: u64,
    pub max_warehouse_size: u64,
    pub max_search_size: u64,
    /// Upper bound on `from + size` accepted by the search engine.
    pub max_search_window: u64,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_warehouse_size: 500,
            max_search_size: 100,
            max_search_window: 10_000,
        }
    }
}

/// Complete configuration of the backend facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub tables: TableNames,
    pub search: SearchIndices,
    pub pagination: PaginationLimits,
    pub max_region_window: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            tables: TableNames::default(),
            search: SearchIndices::default(),
            pagination: PaginationLimits::default(),
            max_region_window: DEFAULT_MAX_REGION_WINDOW,
        }
    }
}

impl BackendConfig {
    /// Configuration with the stock table names and limits.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Check identifiers and limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (role, value) in self.tables.entries() {
            validate_identifier(role, value, TABLE_CHARS)?;
        }
        validate_identifier("search.studies", &self.search.studies, INDEX_CHARS)?;
        validate_identifier("search.variants", &self.search.variants, INDEX_CHARS)?;
        validate_identifier("search.genes", &self.search.genes, INDEX_CHARS)?;

        let limits = &self.pagination;
        for (name, value) in [
            ("default_size", limits.default_size),
            ("max_warehouse_size", limits.max_warehouse_size),
            ("max_search_size", limits.max_search_size),
            ("max_search_window", limits.max_search_window),
            ("max_region_window", self.max_region_window),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidLimit {
                    name,
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if limits.max_search_size > limits.max_search_window {
            return Err(ConfigError::InvalidLimit {
                name: "max_search_size",
                message: format!(
                    "{} exceeds max_search_window {}",
                    limits.max_search_size, limits.max_search_window
                ),
            });
        }

        Ok(())
    }
}

const TABLE_CHARS: &[char] = &['_', '.'];
const INDEX_CHARS: &[char] = &['_', '.', '*', '-'];

fn validate_identifier(
    role: &'static str,
    value: &str,
    allowed: &[char],
) -> Result<(), ConfigError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || allowed.contains(&c));
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            role,
            value: value.to_string(),
        })
    }
}
