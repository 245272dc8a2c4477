//! Folding of flat V2G rows into per-gene associations and schema families.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{
    DistanceEvidence, EvidenceFamily, FunctionalPredictionEvidence, G2VAssociation, G2VSchema,
    G2VSchemaElement, IntervalEvidence, QtlEvidence, SourceScore,
};
use crate::mapper::rows::{GENE_COLUMNS, row_to_gene};
use crate::ports::{DecodeError, Row};

const OVERALL_SCORE: usize = GENE_COLUMNS;
const SOURCE_LIST: usize = GENE_COLUMNS + 1;
const SOURCE_SCORE_LIST: usize = GENE_COLUMNS + 2;
const TYPE_ID: usize = GENE_COLUMNS + 3;

pub fn row_to_schema_element(row: &Row) -> Result<G2VSchemaElement, DecodeError> {
    Ok(G2VSchemaElement {
        type_id: row.string(0)?,
        source_id: row.string(1)?,
        feature_set: row.string_array(2)?,
    })
}

/// Group structure rows by evidence family, keeping row order within each
/// family. Rows of unknown types are dropped.
pub fn rows_to_schema(rows: &[Row]) -> Result<G2VSchema, DecodeError> {
    let mut schema = G2VSchema::default();
    for row in rows {
        let element = row_to_schema_element(row)?;
        match EvidenceFamily::from_type_id(&element.type_id) {
            Some(family) => schema.family_mut(family).push(element),
            None => debug!(type_id = %element.type_id, "Skipping unknown V2G evidence type"),
        }
    }
    Ok(schema)
}

fn row_to_source_scores(row: &Row) -> Result<Vec<SourceScore>, DecodeError> {
    let sources = row.string_array(SOURCE_LIST)?;
    let scores = row.f64_array(SOURCE_SCORE_LIST)?;
    if sources.len() != scores.len() {
        return Err(DecodeError::new(
            format!("columns {SOURCE_LIST}-{SOURCE_SCORE_LIST}"),
            "arrays of equal length",
        ));
    }
    Ok(sources
        .into_iter()
        .zip(scores)
        .map(|(source_id, score)| SourceScore { source_id, score })
        .collect())
}

/// Attach the evidence carried by `row` to `association`.
fn fold_evidence(association: &mut G2VAssociation, row: &Row) -> Result<(), DecodeError> {
    let type_id = row.string(TYPE_ID)?;
    let source_id = row.string(TYPE_ID + 1)?;
    let feature = row.string(TYPE_ID + 2)?;

    let Some(family) = EvidenceFamily::from_type_id(&type_id) else {
        debug!(%type_id, gene = %association.gene.id, "Skipping unknown V2G evidence type");
        return Ok(());
    };

    match family {
        EvidenceFamily::FunctionalPrediction => {
            association
                .functional_predictions
                .push(FunctionalPredictionEvidence {
                    type_id,
                    source_id,
                    feature,
                    max_effect_label: row.non_empty_string(TYPE_ID + 3)?,
                    max_effect_score: row.opt_f64(TYPE_ID + 4)?,
                });
        }
        EvidenceFamily::Qtl => association.qtls.push(QtlEvidence {
            type_id,
            source_id,
            feature,
            beta: row.opt_f64(TYPE_ID + 5)?,
            se: row.opt_f64(TYPE_ID + 6)?,
            pval: row.opt_f64(TYPE_ID + 7)?,
            score: row.opt_f64(TYPE_ID + 8)?,
            score_quantile: row.opt_f64(TYPE_ID + 9)?,
        }),
        EvidenceFamily::Interval => association.intervals.push(IntervalEvidence {
            type_id,
            source_id,
            feature,
            score: row.opt_f64(TYPE_ID + 10)?,
            score_quantile: row.opt_f64(TYPE_ID + 11)?,
        }),
        EvidenceFamily::Distance => association.distances.push(DistanceEvidence {
            type_id,
            source_id,
            feature,
            distance: row.opt_u64(TYPE_ID + 12)?,
            score: row.opt_f64(TYPE_ID + 13)?,
            score_quantile: row.opt_f64(TYPE_ID + 14)?,
        }),
    }
    Ok(())
}

/// Group scored evidence rows by gene id in first-seen order and fold each
/// group into one association.
///
/// Gene attributes and scores are taken from the first row of each group.
pub fn rows_to_g2v_associations(rows: &[Row]) -> Result<Vec<G2VAssociation>, DecodeError> {
    let mut associations: Vec<G2VAssociation> = Vec::new();
    let mut by_gene: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let gene_id = row.string(0)?;
        let slot = match by_gene.get(&gene_id) {
            Some(slot) => *slot,
            None => {
                let association = G2VAssociation::new(
                    row_to_gene(row, 0)?,
                    row.f64(OVERALL_SCORE)?,
                    row_to_source_scores(row)?,
                );
                associations.push(association);
                by_gene.insert(gene_id, associations.len() - 1);
                associations.len() - 1
            }
        };
        fold_evidence(&mut associations[slot], row)?;
    }

    Ok(associations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn evidence_row(gene_id: &str, symbol: &str, type_id: &str, source_id: &str) -> Row {
        let mut cells = vec![
            json!(gene_id),
            json!(symbol),
            json!("protein_coding"),
            json!("1"),
            json!(1_000),
            json!(900),
            json!(5_000),
            json!(0),
            json!(""),
            json!(0.6),
            json!(["gtex_v7", "vep"]),
            json!([0.4, 0.2]),
            json!(type_id),
            json!(source_id),
            json!("UBERON_0000178"),
        ];
        // fpred label/score, qtl x5, interval x2, distance x3
        cells.extend([
            json!("missense_variant"),
            json!(0.66),
            json!(0.12),
            json!(0.01),
            json!(1e-6),
            json!(6.0),
            json!(0.9),
            json!(0.3),
            json!(0.5),
            json!("1200"),
            json!(0.8),
            Value::Null,
        ]);
        Row::new(cells)
    }

    #[test]
    fn test_groups_by_gene_in_first_seen_order() {
        let rows = vec![
            evidence_row("ENSG2", "B", "eqtl", "gtex_v7"),
            evidence_row("ENSG2", "B", "distance", "canonical_tss"),
            evidence_row("ENSG1", "A", "fpred", "vep"),
            evidence_row("ENSG2", "B", "pchic", "javierre2016"),
        ];
        let associations = rows_to_g2v_associations(&rows).unwrap();

        assert_eq!(associations.len(), 2);
        assert_eq!(associations[0].gene.id, "ENSG2");
        assert_eq!(associations[1].gene.id, "ENSG1");

        let first = &associations[0];
        assert_eq!(first.gene.strand, Some(false));
        assert_eq!(first.qtls.len(), 1);
        assert_eq!(first.distances.len(), 1);
        assert_eq!(first.intervals.len(), 1);
        assert!(first.functional_predictions.is_empty());
        assert_eq!(first.distances[0].distance, Some(1_200));
        assert!(first.distances[0].score_quantile.is_none());
        assert_eq!(first.qtls[0].pval, Some(1e-6));
        assert_eq!(first.source_scores.len(), 2);
        assert_eq!(first.source_scores[0].source_id, "gtex_v7");

        let second = &associations[1];
        assert_eq!(
            second.functional_predictions[0].max_effect_label.as_deref(),
            Some("missense_variant")
        );
    }

    #[test]
    fn test_unknown_evidence_type_keeps_gene() {
        let rows = vec![evidence_row("ENSG1", "A", "mystery", "x")];
        let associations = rows_to_g2v_associations(&rows).unwrap();
        assert_eq!(associations.len(), 1);
        assert!(associations[0].qtls.is_empty());
        assert!(associations[0].distances.is_empty());
    }

    #[test]
    fn test_mismatched_source_scores_fail() {
        let mut cells: Vec<Value> = vec![json!("ENSG1")];
        cells.extend(std::iter::repeat_n(json!(""), 3));
        cells.extend([json!(0), json!(0), json!(0), json!(0), json!("")]);
        cells.extend([json!(0.5), json!(["vep"]), json!([])]);
        assert!(rows_to_g2v_associations(&[Row::new(cells)]).is_err());
    }

    #[test]
    fn test_schema_grouped_by_family() {
        let rows = vec![
            Row::new(vec![json!("eqtl"), json!("gtex_v7"), json!(["UBERON_1"])]),
            Row::new(vec![json!("fantom5"), json!("fantom5"), json!(["unspecified"])]),
            Row::new(vec![json!("pqtl"), json!("sun2018"), json!(["blood"])]),
            Row::new(vec![json!("other"), json!("x"), json!([])]),
            Row::new(vec![json!("distance"), json!("canonical_tss"), Value::Null]),
        ];
        let schema = rows_to_schema(&rows).unwrap();
        assert_eq!(schema.qtls.len(), 2);
        assert_eq!(schema.qtls[1].source_id, "sun2018");
        assert_eq!(schema.intervals.len(), 1);
        assert!(schema.functional_predictions.is_empty());
        assert!(schema.distances[0].feature_set.is_empty());
    }
}
