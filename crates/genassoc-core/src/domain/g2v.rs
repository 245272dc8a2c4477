//! Gene-to-variant (V2G) scoring types.

use serde::{Deserialize, Serialize};

use crate::domain::{Gene, Variant};

/// Family of functional evidence a `type_id` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceFamily {
    Qtl,
    Interval,
    FunctionalPrediction,
    Distance,
}

impl EvidenceFamily {
    /// Classify a warehouse `type_id`. Unknown types yield `None`.
    #[must_use]
    pub fn from_type_id(type_id: &str) -> Option<Self> {
        match type_id {
            "eqtl" | "pqtl" | "sqtl" => Some(Self::Qtl),
            "fantom5" | "dhscor" | "pchic" => Some(Self::Interval),
            "fpred" => Some(Self::FunctionalPrediction),
            "distance" => Some(Self::Distance),
            _ => None,
        }
    }
}

// ============================================================================
// Schema
// ============================================================================

/// One `(type, source)` pair and the features it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct G2VSchemaElement {
    pub type_id: String,
    pub source_id: String,
    pub feature_set: Vec<String>,
}

/// The available V2G evidence sources, grouped by family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct G2VSchema {
    pub qtls: Vec<G2VSchemaElement>,
    pub intervals: Vec<G2VSchemaElement>,
    pub functional_predictions: Vec<G2VSchemaElement>,
    pub distances: Vec<G2VSchemaElement>,
}

impl G2VSchema {
    pub(crate) fn family_mut(&mut self, family: EvidenceFamily) -> &mut Vec<G2VSchemaElement> {
        match family {
            EvidenceFamily::Qtl => &mut self.qtls,
            EvidenceFamily::Interval => &mut self.intervals,
            EvidenceFamily::FunctionalPrediction => &mut self.functional_predictions,
            EvidenceFamily::Distance => &mut self.distances,
        }
    }
}

// ============================================================================
// Evidence
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QtlEvidence {
    pub type_id: String,
    pub source_id: String,
    pub feature: String,
    pub beta: Option<f64>,
    pub se: Option<f64>,
    pub pval: Option<f64>,
    pub score: Option<f64>,
    pub score_quantile: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalEvidence {
    pub type_id: String,
    pub source_id: String,
    pub feature: String,
    pub score: Option<f64>,
    pub score_quantile: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionalPredictionEvidence {
    pub type_id: String,
    pub source_id: String,
    pub feature: String,
    pub max_effect_label: Option<String>,
    pub max_effect_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceEvidence {
    pub type_id: String,
    pub source_id: String,
    pub feature: String,
    pub distance: Option<u64>,
    pub score: Option<f64>,
    pub score_quantile: Option<f64>,
}

/// Score of one evidence source towards the overall V2G score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceScore {
    pub source_id: String,
    pub score: f64,
}

/// All functional evidence linking the queried variant to one gene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct G2VAssociation {
    pub gene: Gene,
    pub overall_score: f64,
    pub source_scores: Vec<SourceScore>,
    pub qtls: Vec<QtlEvidence>,
    pub intervals: Vec<IntervalEvidence>,
    pub functional_predictions: Vec<FunctionalPredictionEvidence>,
    pub distances: Vec<DistanceEvidence>,
}

impl G2VAssociation {
    /// Start an association with no evidence attached yet.
    #[must_use]
    pub const fn new(gene: Gene, overall_score: f64, source_scores: Vec<SourceScore>) -> Self {
        Self {
            gene,
            overall_score,
            source_scores,
            qtls: Vec::new(),
            intervals: Vec::new(),
            functional_predictions: Vec::new(),
            distances: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct G2VTable {
    pub variant: Variant,
    pub associations: Vec<G2VAssociation>,
}
