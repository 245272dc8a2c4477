//! Query builder: one parameterized query template per association view.
//!
//! Only configured table names, validated chromosomes and computed page
//! bounds are interpolated into query text. Every record-level filter value
//! is a bound parameter.
//!
//! All high-cardinality tables are filtered with `PREWHERE` on their
//! chromosome/position keys, and gene attributes come from key lookups into
//! the gene dictionary instead of a join against the gene table.
//!
//! Column order of each `SELECT` is part of the contract with
//! [`crate::mapper`], which decodes rows positionally.

use crate::config::TableNames;
use crate::domain::{Chromosome, Region, Variant};
use crate::pagination::WarehousePage;
use crate::ports::{Query, QueryParam};

/// Summary statistics tables are segmented in windows of this many bases.
pub const SUMMARY_STATS_SEGMENT_SIZE: u64 = 1_000_000;

/// Builds warehouse queries against a fixed set of tables.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    tables: TableNames,
}

impl QueryBuilder {
    #[must_use]
    pub const fn new(tables: TableNames) -> Self {
        Self { tables }
    }

    #[must_use]
    pub const fn tables(&self) -> &TableNames {
        &self.tables
    }

    /// Gene attributes for `key`, looked up in the gene dictionary.
    ///
    /// Yields nine columns: id, name, biotype, chromosome, tss, start, end,
    /// forward-strand flag, exons.
    fn gene_attributes(&self, key: &str) -> String {
        let dict = &self.tables.gene_dictionary;
        format!(
            "{key} AS gene_id, \
             dictGetString('{dict}', 'gene_name', tuple({key})) AS gene_name, \
             dictGetString('{dict}', 'biotype', tuple({key})) AS gene_biotype, \
             dictGetString('{dict}', 'chr', tuple({key})) AS gene_chromosome, \
             dictGetUInt32('{dict}', 'tss', tuple({key})) AS gene_tss, \
             dictGetUInt32('{dict}', 'start', tuple({key})) AS gene_start, \
             dictGetUInt32('{dict}', 'end', tuple({key})) AS gene_end, \
             dictGetUInt8('{dict}', 'fwdstrand', tuple({key})) AS gene_fwdstrand, \
             dictGetString('{dict}', 'exons', tuple({key})) AS gene_exons"
        )
    }

    /// Per-study summary statistics of one variant.
    #[must_use]
    pub fn phewas(&self, chromosome: &Chromosome, variant: &Variant, page: WarehousePage) -> Query {
        let table = format!("{}{}", self.tables.summary_stats_by_chromosome, chromosome);
        let sql = format!(
            "SELECT study_id, pval, beta, se, eaf, maf, \
                    n_samples_variant_level, n_samples_study_level, \
                    n_cases_study_level, n_cases_variant_level, \
                    if(is_cc, exp(beta), NULL) AS odds_ratio, chip, info \
             FROM {table} \
             PREWHERE chrom = {{chrom:String}} \
                 AND pos_b37 = {{pos:UInt64}} \
                 AND segment = {{segment:UInt64}} \
                 AND variant_id_b37 = {{variant_id:String}} \
             {page}",
            page = page.to_sql()
        );

        Query::new(sql)
            .bind("chrom", QueryParam::String(chromosome.to_string()))
            .bind("pos", QueryParam::UInt64(variant.position.coordinate))
            .bind(
                "segment",
                QueryParam::UInt64(variant.position.coordinate / SUMMARY_STATS_SEGMENT_SIZE),
            )
            .bind("variant_id", QueryParam::String(variant.id()))
    }

    /// `(type, source, feature set)` triples of the V2G structure table.
    #[must_use]
    pub fn g2v_schema(&self) -> Query {
        Query::new(format!(
            "SELECT type_id, source_id, feature_set FROM {} ORDER BY type_id, source_id",
            self.tables.variant_to_gene_structure
        ))
    }

    /// Study metadata for a set of study ids. Sample counts are coalesced to
    /// zero; every other nullable column is left nullable.
    #[must_use]
    pub fn studies(&self, study_ids: &[String]) -> Query {
        let sql = format!(
            "SELECT study_id, trait_reported, trait_efos, pmid, pub_date, pub_journal, \
                    pub_title, pub_author, ancestry_initial, ancestry_replication, \
                    coalesce(n_initial, 0) AS n_initial, \
                    coalesce(n_replication, 0) AS n_replication, \
                    coalesce(n_cases, 0) AS n_cases, \
                    trait_category, num_assoc_loci \
             FROM {} \
             PREWHERE study_id IN {{study_ids:Array(String)}}",
            self.tables.studies
        );
        Query::new(sql).bind("study_ids", QueryParam::StringArray(study_ids.to_vec()))
    }

    /// Association signals of one study, one row per index variant, with the
    /// genes that score above zero for that index variant.
    #[must_use]
    pub fn manhattan(&self, study_id: &str, page: WarehousePage) -> Query {
        let v2d = &self.tables.variant_to_disease_by_study;
        let scores = &self.tables.disease_to_variant_to_gene_overall_score;
        let dict = &self.tables.gene_dictionary;
        let sql = format!(
            "SELECT index_variant_id, index_rs_id, pval, \
                    credible_set_size, ld_set_size, total_set_size, \
                    top_genes_ids, top_genes_names, top_genes_scores \
             FROM ( \
                 SELECT index_variant_id, \
                        any(index_rs_id) AS index_rs_id, \
                        min(pval) AS pval, \
                        uniqIf(variant_id, posterior_prob > 0) AS credible_set_size, \
                        uniqIf(variant_id, overall_r2 > 0) AS ld_set_size, \
                        uniq(variant_id) AS total_set_size \
                 FROM {v2d} \
                 PREWHERE stid = {{study_id:String}} \
                 GROUP BY index_variant_id \
             ) ALL LEFT OUTER JOIN ( \
                 SELECT variant_id AS index_variant_id, \
                        groupArray(gene_id) AS top_genes_ids, \
                        groupArray(dictGetString('{dict}', 'gene_name', tuple(gene_id))) AS top_genes_names, \
                        groupArray(overall_score) AS top_genes_scores \
                 FROM {scores} \
                 PREWHERE variant_id IN ( \
                     SELECT index_variant_id FROM {v2d} PREWHERE stid = {{study_id:String}} \
                 ) AND overall_score > 0 \
                 GROUP BY variant_id \
             ) USING (index_variant_id) \
             ORDER BY index_variant_id ASC \
             {page}",
            page = page.to_sql()
        );
        Query::new(sql).bind("study_id", QueryParam::String(study_id.to_string()))
    }

    /// Shared projection of the variant-to-disease-by-position table: index
    /// variant (5 columns), tag variant (5 columns), then statistics.
    fn v2d_by_position(&self, filter: &str, variant: &Variant, page: WarehousePage) -> Query {
        let sql = format!(
            "SELECT index_chr_id, index_position, index_ref_allele, index_alt_allele, index_rs_id, \
                    chr_id, position, ref_allele, alt_allele, rs_id, \
                    stid, pval, coalesce(n_initial, 0) AS n_total, coalesce(n_cases, 0) AS n_cases, overall_r2, \
                    AFR_1000G_prop, AMR_1000G_prop, EAS_1000G_prop, EUR_1000G_prop, SAS_1000G_prop, \
                    log10_ABF, posterior_prob, \
                    odds_ratio, oddsr_ci_lower, oddsr_ci_upper, \
                    beta, beta_ci_lower, beta_ci_upper, direction \
             FROM {table} \
             PREWHERE {filter} \
             {page}",
            table = self.tables.variant_to_disease_by_position,
            page = page.to_sql()
        );
        bind_variant(Query::new(sql), variant)
    }

    /// Tag variants associated with an exact index variant.
    #[must_use]
    pub fn index_variant_associations(&self, variant: &Variant, page: WarehousePage) -> Query {
        self.v2d_by_position(
            "index_chr_id = {chrom:String} \
             AND index_position = {pos:UInt64} \
             AND index_ref_allele = {ref:String} \
             AND index_alt_allele = {alt:String}",
            variant,
            page,
        )
    }

    /// Index variants associated with an exact tag variant.
    #[must_use]
    pub fn tag_variant_associations(&self, variant: &Variant, page: WarehousePage) -> Query {
        self.v2d_by_position(
            "chr_id = {chrom:String} \
             AND position = {pos:UInt64} \
             AND ref_allele = {ref:String} \
             AND alt_allele = {alt:String}",
            variant,
            page,
        )
    }

    /// Study / index variant / tag variant / gene lines touching a region.
    ///
    /// A line is kept when the tag variant, the index variant, or the gene's
    /// start or end falls inside the (inclusive) window, and the
    /// variant-gene pair has a positive overall score.
    #[must_use]
    pub fn gecko(&self, chromosome: &Chromosome, region: Region) -> Query {
        let d2v2g = &self.tables.disease_to_variant_to_gene;
        let scores = &self.tables.disease_to_variant_to_gene_overall_score;
        let dict = &self.tables.gene_dictionary;
        let sql = format!(
            "SELECT index_variant_id, index_rs_id, variant_id, rs_id, \
                    {gene}, \
                    stid, r2, posterior_prob, pval, overall_score \
             FROM ( \
                 SELECT stid, index_variant_id, any(index_rs_id) AS index_rs_id, \
                        variant_id, any(rs_id) AS rs_id, gene_id, \
                        any(r2) AS r2, any(posterior_prob) AS posterior_prob, any(pval) AS pval \
                 FROM {d2v2g} \
                 PREWHERE chr_id = {{chrom:String}} AND ( \
                     (position >= {{start:UInt64}} AND position <= {{end:UInt64}}) \
                     OR (index_position >= {{start:UInt64}} AND index_position <= {{end:UInt64}}) \
                     OR (dictGetUInt32('{dict}', 'start', tuple(gene_id)) >= {{start:UInt64}} \
                         AND dictGetUInt32('{dict}', 'start', tuple(gene_id)) <= {{end:UInt64}}) \
                     OR (dictGetUInt32('{dict}', 'end', tuple(gene_id)) >= {{start:UInt64}} \
                         AND dictGetUInt32('{dict}', 'end', tuple(gene_id)) <= {{end:UInt64}}) \
                 ) \
                 GROUP BY stid, index_variant_id, variant_id, gene_id \
             ) ALL INNER JOIN ( \
                 SELECT variant_id, gene_id, overall_score \
                 FROM {scores} \
                 PREWHERE chr_id = {{chrom:String}} AND overall_score > 0 \
             ) USING (variant_id, gene_id)",
            gene = self.gene_attributes("gene_id"),
        );
        Query::new(sql)
            .bind("chrom", QueryParam::String(chromosome.to_string()))
            .bind("start", QueryParam::UInt64(region.start))
            .bind("end", QueryParam::UInt64(region.end))
    }

    /// Scored gene-to-variant evidence for one exact variant, one row per
    /// (gene, evidence feature), ordered by gene id.
    #[must_use]
    pub fn g2v(&self, variant: &Variant) -> Query {
        let sql = format!(
            "SELECT {gene}, \
                    overall_score, source_list, source_score_list, \
                    type_id, source_id, feature, \
                    fpred_max_label, fpred_max_score, \
                    qtl_beta, qtl_se, qtl_pval, qtl_score, qtl_score_q, \
                    interval_score, interval_score_q, \
                    d, distance_score, distance_score_q \
             FROM ( \
                 SELECT gene_id, type_id, source_id, feature, \
                        fpred_max_label, fpred_max_score, \
                        qtl_beta, qtl_se, qtl_pval, qtl_score, qtl_score_q, \
                        interval_score, interval_score_q, \
                        d, distance_score, distance_score_q \
                 FROM {v2g} \
                 PREWHERE chr_id = {{chrom:String}} AND position = {{pos:UInt64}} \
                     AND ref_allele = {{ref:String}} AND alt_allele = {{alt:String}} \
             ) ALL INNER JOIN ( \
                 SELECT gene_id, overall_score, source_list, source_score_list \
                 FROM {scores} \
                 PREWHERE chr_id = {{chrom:String}} AND position = {{pos:UInt64}} \
                     AND ref_allele = {{ref:String}} AND alt_allele = {{alt:String}} \
             ) USING (gene_id) \
             ORDER BY gene_id ASC",
            gene = self.gene_attributes("gene_id"),
            v2g = self.tables.variant_to_gene,
            scores = self.tables.variant_to_gene_overall_score,
        );
        bind_variant(Query::new(sql), variant)
    }
}

fn bind_variant(query: Query, variant: &Variant) -> Query {
    query
        .bind(
            "chrom",
            QueryParam::String(variant.position.chromosome.clone()),
        )
        .bind("pos", QueryParam::UInt64(variant.position.coordinate))
        .bind("ref", QueryParam::String(variant.ref_allele.clone()))
        .bind("alt", QueryParam::String(variant.alt_allele.clone()))
}
