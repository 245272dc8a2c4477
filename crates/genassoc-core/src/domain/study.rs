//! GWAS study metadata.

use serde::{Deserialize, Serialize};

use crate::domain::Violation;

/// Metadata of one GWAS study.
///
/// Sample counts are zero when the warehouse has no value for them; the
/// remaining nullable fields stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Study {
    pub study_id: String,
    pub trait_reported: String,
    #[serde(default)]
    pub trait_efos: Vec<String>,
    pub pmid: Option<String>,
    pub pub_date: Option<String>,
    pub pub_journal: Option<String>,
    pub pub_title: Option<String>,
    pub pub_author: Option<String>,
    #[serde(default)]
    pub ancestry_initial: Vec<String>,
    #[serde(default)]
    pub ancestry_replication: Vec<String>,
    #[serde(default)]
    pub n_initial: u64,
    #[serde(default)]
    pub n_replication: u64,
    #[serde(default)]
    pub n_cases: u64,
    pub trait_category: Option<String>,
    pub num_assoc_loci: Option<u64>,
}

/// Validate a raw study identifier. Study ids are case-sensitive, so only
/// surrounding whitespace is removed.
pub fn parse_study_id(raw: &str) -> Result<String, Violation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Violation::InvalidStudy {
            input: raw.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
