//! Subcommands, one per backend operation.

use clap::{Args, Subcommand};
use genassoc_core::PageRequest;

/// Page selection shared by the paginated views.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PageArgs {
    /// Zero-based page index
    #[arg(long)]
    pub page: Option<u64>,
    /// Page size (clamped to the configured maximum)
    #[arg(long)]
    pub size: Option<u64>,
}

impl From<PageArgs> for PageRequest {
    fn from(args: PageArgs) -> Self {
        Self::new(args.page, args.size)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Per-study summary statistics for a variant
    Phewas {
        /// Variant id, CHROM_POS_REF_ALT
        variant_id: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// List the available V2G evidence sources
    G2vSchema,

    /// Look up study metadata by id
    Studies {
        /// One or more study ids
        #[arg(required = true)]
        study_ids: Vec<String>,
    },

    /// Association signals of a study
    Manhattan {
        study_id: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Tag variants in LD with / fine-mapped to an index variant
    IndexVariant {
        variant_id: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Index variants that a tag variant is associated with
    TagVariant {
        variant_id: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Regional view of variants, genes and studies
    Gecko {
        /// Chromosome name, e.g. 7, X or chrMT
        chromosome: String,
        /// Region start (inclusive)
        #[arg(allow_negative_numbers = true)]
        start: i64,
        /// Region end (inclusive)
        #[arg(allow_negative_numbers = true)]
        end: i64,
    },

    /// Scored gene evidence for a variant
    G2v {
        variant_id: String,
    },

    /// Search studies, variants and genes
    Search {
        query: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Check that a study id exists
    ValidateStudy {
        study_id: String,
    },
}
