//! Row mappers for the flat association views.
//!
//! Column offsets follow the `SELECT` lists of [`crate::query::QueryBuilder`].

use crate::domain::{
    Gene, IndexVariantAssociation, ManhattanAssociation, PhewasAssociation, Position, ScoredGene,
    Study, TagVariantAssociation, V2DStatistics, Variant,
};
use crate::ports::{DecodeError, Row};

/// Number of columns produced by a gene dictionary projection.
pub const GENE_COLUMNS: usize = 9;

/// Number of columns describing one variant in the by-position table.
const V2D_VARIANT_COLUMNS: usize = 5;

/// Decode a dictionary-enriched gene starting at `offset`.
///
/// Dictionary lookups report unknown keys with `""` and `0`, which are
/// mapped to absent attributes here.
pub fn row_to_gene(row: &Row, offset: usize) -> Result<Gene, DecodeError> {
    let chromosome = row.non_empty_string(offset + 3)?;
    let positive = |value: Option<u64>| value.filter(|v| *v > 0);
    let strand = if chromosome.is_some() {
        row.opt_bool(offset + 7)?
    } else {
        None
    };

    Ok(Gene {
        id: row.string(offset)?,
        symbol: row.non_empty_string(offset + 1)?,
        bio_type: row.non_empty_string(offset + 2)?,
        chromosome,
        tss: positive(row.opt_u64(offset + 4)?),
        start: positive(row.opt_u64(offset + 5)?),
        end: positive(row.opt_u64(offset + 6)?),
        strand,
        exons: row.u64_array(offset + 8)?,
    })
}

/// Decode `chr, position, ref, alt, rs_id` starting at `offset`.
fn row_to_variant(row: &Row, offset: usize) -> Result<Variant, DecodeError> {
    let position = Position::new(row.string(offset)?, row.u64(offset + 1)?);
    Ok(
        Variant::new(position, row.string(offset + 2)?, row.string(offset + 3)?)
            .with_rs_id(row.non_empty_string(offset + 4)?),
    )
}

/// Re-derive a variant from a stored `CHR_POS_REF_ALT` identifier.
pub fn parse_stored_variant(
    row: &Row,
    index: usize,
    rs_id: Option<String>,
) -> Result<Variant, DecodeError> {
    let raw = row.string(index)?;
    Variant::parse(&raw)
        .map(|variant| variant.with_rs_id(rs_id))
        .map_err(|_| DecodeError::new(format!("column {index} ('{raw}')"), "variant id"))
}

pub fn row_to_phewas(row: &Row) -> Result<PhewasAssociation, DecodeError> {
    Ok(PhewasAssociation {
        study_id: row.string(0)?,
        pval: row.f64(1)?,
        beta: row.opt_f64(2)?,
        se: row.opt_f64(3)?,
        eaf: row.opt_f64(4)?,
        maf: row.opt_f64(5)?,
        n_samples_variant_level: row.opt_u64(6)?,
        n_samples_study_level: row.opt_u64(7)?,
        n_cases_study_level: row.opt_u64(8)?,
        n_cases_variant_level: row.opt_u64(9)?,
        odds_ratio: row.opt_f64(10)?,
        chip: row.non_empty_string(11)?,
        info: row.opt_f64(12)?,
    })
}

/// Sample counts arrive coalesced to zero; every other nullable column
/// stays optional.
pub fn row_to_study(row: &Row) -> Result<Study, DecodeError> {
    Ok(Study {
        study_id: row.string(0)?,
        trait_reported: row.string(1)?,
        trait_efos: row.string_array(2)?,
        pmid: row.non_empty_string(3)?,
        pub_date: row.non_empty_string(4)?,
        pub_journal: row.non_empty_string(5)?,
        pub_title: row.non_empty_string(6)?,
        pub_author: row.non_empty_string(7)?,
        ancestry_initial: row.string_array(8)?,
        ancestry_replication: row.string_array(9)?,
        n_initial: row.u64(10)?,
        n_replication: row.u64(11)?,
        n_cases: row.u64(12)?,
        trait_category: row.non_empty_string(13)?,
        num_assoc_loci: row.opt_u64(14)?,
    })
}

pub fn row_to_manhattan(row: &Row) -> Result<ManhattanAssociation, DecodeError> {
    let variant = parse_stored_variant(row, 0, row.non_empty_string(1)?)?;

    let ids = row.string_array(6)?;
    let names = row.string_array(7)?;
    let scores = row.f64_array(8)?;
    if ids.len() != scores.len() || ids.len() != names.len() {
        return Err(DecodeError::new(
            "columns 6-8",
            "arrays of equal length",
        ));
    }
    let best_genes = ids
        .into_iter()
        .zip(names)
        .zip(scores)
        .map(|((id, name), score)| ScoredGene {
            gene: Gene {
                symbol: Some(name).filter(|s| !s.is_empty()),
                ..Gene::new(id)
            },
            score,
        })
        .collect();

    Ok(ManhattanAssociation {
        variant,
        pval: row.f64(2)?,
        credible_set_size: row.u64(3)?,
        ld_set_size: row.u64(4)?,
        total_set_size: row.u64(5)?,
        best_genes,
    })
}

fn row_to_v2d_statistics(row: &Row) -> Result<V2DStatistics, DecodeError> {
    Ok(V2DStatistics {
        study_id: row.string(10)?,
        pval: row.f64(11)?,
        n_total: row.u64(12)?,
        n_cases: row.u64(13)?,
        r2: row.opt_f64(14)?,
        afr_1000g_prop: row.opt_f64(15)?,
        amr_1000g_prop: row.opt_f64(16)?,
        eas_1000g_prop: row.opt_f64(17)?,
        eur_1000g_prop: row.opt_f64(18)?,
        sas_1000g_prop: row.opt_f64(19)?,
        log10_abf: row.opt_f64(20)?,
        posterior_probability: row.opt_f64(21)?,
        odds_ratio: row.opt_f64(22)?,
        odds_ratio_ci_lower: row.opt_f64(23)?,
        odds_ratio_ci_upper: row.opt_f64(24)?,
        beta: row.opt_f64(25)?,
        beta_ci_lower: row.opt_f64(26)?,
        beta_ci_upper: row.opt_f64(27)?,
        direction: row.non_empty_string(28)?,
    })
}

pub fn row_to_index_variant_association(
    row: &Row,
) -> Result<IndexVariantAssociation, DecodeError> {
    Ok(IndexVariantAssociation {
        tag_variant: row_to_variant(row, V2D_VARIANT_COLUMNS)?,
        statistics: row_to_v2d_statistics(row)?,
    })
}

pub fn row_to_tag_variant_association(row: &Row) -> Result<TagVariantAssociation, DecodeError> {
    Ok(TagVariantAssociation {
        index_variant: row_to_variant(row, 0)?,
        statistics: row_to_v2d_statistics(row)?,
    })
}
