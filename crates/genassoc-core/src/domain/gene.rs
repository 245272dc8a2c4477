//! Gene value type.

use serde::{Deserialize, Serialize};

use crate::domain::Violation;

/// An Ensembl-style gene, optionally enriched with dictionary attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Gene {
    pub id: String,
    pub symbol: Option<String>,
    pub start: Option<u64>,
    pub end: Option<u64>,
    pub tss: Option<u64>,
    pub chromosome: Option<String>,
    pub bio_type: Option<String>,
    /// `true` for the forward strand.
    pub strand: Option<bool>,
    pub exons: Vec<u64>,
}

impl Gene {
    /// Build a gene carrying only its identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Parse a raw gene identifier, dropping any `.version` suffix.
    ///
    /// ```
    /// use genassoc_core::domain::Gene;
    ///
    /// let gene = Gene::parse("ensg00000139618.5").unwrap();
    /// assert_eq!(gene.id, "ENSG00000139618");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, Violation> {
        raw.to_uppercase()
            .split('.')
            .find(|token| !token.is_empty())
            .map(Self::new)
            .ok_or_else(|| Violation::InvalidGene {
                input: raw.to_string(),
            })
    }
}
