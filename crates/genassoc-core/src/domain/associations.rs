//! Association records and the per-view tables that hold them.
//!
//! Every record is decoded from a single warehouse row and never mutated
//! afterwards. Tables keep records in storage order.

use serde::{Deserialize, Serialize};

use crate::domain::{Gene, Variant};

// ============================================================================
// PheWAS
// ============================================================================

/// Summary statistics of one variant in one study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhewasAssociation {
    pub study_id: String,
    pub pval: f64,
    pub beta: Option<f64>,
    pub se: Option<f64>,
    pub eaf: Option<f64>,
    pub maf: Option<f64>,
    pub n_samples_variant_level: Option<u64>,
    pub n_samples_study_level: Option<u64>,
    pub n_cases_study_level: Option<u64>,
    pub n_cases_variant_level: Option<u64>,
    /// Only present for case/control studies.
    pub odds_ratio: Option<f64>,
    pub chip: Option<String>,
    pub info: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhewasTable {
    pub variant: Variant,
    pub associations: Vec<PhewasAssociation>,
}

// ============================================================================
// Manhattan
// ============================================================================

/// A gene linked to an index variant with its overall V2G score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredGene {
    pub gene: Gene,
    pub score: f64,
}

/// One association signal of a study, keyed by its index variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManhattanAssociation {
    pub variant: Variant,
    /// Best (lowest) p-value across the signal's tag variants.
    pub pval: f64,
    pub credible_set_size: u64,
    pub ld_set_size: u64,
    pub total_set_size: u64,
    pub best_genes: Vec<ScoredGene>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManhattanTable {
    pub study_id: String,
    pub associations: Vec<ManhattanAssociation>,
}

// ============================================================================
// Index / tag variant associations
// ============================================================================

/// Statistics shared by both sides of a variant-to-disease row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct V2DStatistics {
    pub study_id: String,
    pub pval: f64,
    pub n_total: u64,
    pub n_cases: u64,
    pub r2: Option<f64>,
    pub afr_1000g_prop: Option<f64>,
    pub amr_1000g_prop: Option<f64>,
    pub eas_1000g_prop: Option<f64>,
    pub eur_1000g_prop: Option<f64>,
    pub sas_1000g_prop: Option<f64>,
    pub log10_abf: Option<f64>,
    pub posterior_probability: Option<f64>,
    pub odds_ratio: Option<f64>,
    pub odds_ratio_ci_lower: Option<f64>,
    pub odds_ratio_ci_upper: Option<f64>,
    pub beta: Option<f64>,
    pub beta_ci_lower: Option<f64>,
    pub beta_ci_upper: Option<f64>,
    pub direction: Option<String>,
}

/// A tag variant seen from a queried index variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexVariantAssociation {
    pub tag_variant: Variant,
    pub statistics: V2DStatistics,
}

/// An index variant seen from a queried tag variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagVariantAssociation {
    pub index_variant: Variant,
    pub statistics: V2DStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexVariantTable {
    pub index_variant: Variant,
    pub associations: Vec<IndexVariantAssociation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagVariantTable {
    pub tag_variant: Variant,
    pub associations: Vec<TagVariantAssociation>,
}

// ============================================================================
// Regional (Gecko)
// ============================================================================

/// One study / index variant / tag variant / gene line inside a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeckoLine {
    pub index_variant: Variant,
    pub tag_variant: Variant,
    pub gene: Gene,
    pub study_id: String,
    pub r2: Option<f64>,
    pub posterior_probability: Option<f64>,
    pub pval: Option<f64>,
    pub overall_score: f64,
}
