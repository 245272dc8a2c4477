//! Domain value types.
//!
//! All values here are request-scoped: they are parsed from client input or
//! decoded from storage, returned to the caller, and dropped. Nothing in this
//! module touches storage.

mod associations;
mod g2v;
mod gene;
mod region;
mod search;
mod study;
mod variant;
mod violation;

pub use associations::{
    GeckoLine, IndexVariantAssociation, IndexVariantTable, ManhattanAssociation, ManhattanTable,
    PhewasAssociation, PhewasTable, ScoredGene, TagVariantAssociation, TagVariantTable,
    V2DStatistics,
};
pub use g2v::{
    DistanceEvidence, EvidenceFamily, FunctionalPredictionEvidence, G2VAssociation, G2VSchema,
    G2VSchemaElement, G2VTable, IntervalEvidence, QtlEvidence, SourceScore,
};
pub use gene::Gene;
pub use region::{Chromosome, Region};
pub use search::{SearchCategory, SearchResultSet};
pub use study::{Study, parse_study_id};
pub use variant::{Position, Variant};
pub use violation::Violation;
