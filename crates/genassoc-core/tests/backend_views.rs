//! Integration tests for the backend facade over fake ports.

mod common;

use std::sync::Arc;

use common::fakes::{FakeSearch, FakeWarehouse};
use common::fixtures::{gecko_row, manhattan_row, v2d_row};
use genassoc_core::{
    Backend, BackendConfig, BackendError, PageRequest, QueryParam, Variant, Violation,
};

fn backend(warehouse: Arc<FakeWarehouse>) -> Backend {
    Backend::new(
        BackendConfig::with_defaults(),
        warehouse,
        Arc::new(FakeSearch::new()),
    )
}

#[test]
fn test_parse_variant_scenario() {
    let variant = Variant::parse("1_12345_A_G").unwrap();
    assert_eq!(variant.position.chromosome, "1");
    assert_eq!(variant.position.coordinate, 12345);
    assert_eq!(variant.ref_allele, "A");
    assert_eq!(variant.alt_allele, "G");
    assert!(variant.rs_id.is_none());
    assert_eq!(variant.id(), "1_12345_A_G");
}

#[test]
fn test_parse_gene_scenario() {
    let gene = genassoc_core::Gene::parse("ENSG00000139618.5").unwrap();
    assert_eq!(gene.id, "ENSG00000139618");
    assert!(gene.symbol.is_none());
}

#[tokio::test]
async fn test_index_variant_table_with_empty_result() {
    let warehouse = Arc::new(FakeWarehouse::empty());
    let table = backend(warehouse.clone())
        .index_variant_associations("1_12345_A_G", PageRequest::default())
        .await
        .unwrap();

    assert_eq!(table.index_variant.id(), "1_12345_A_G");
    assert!(table.associations.is_empty());
    assert_eq!(warehouse.calls(), 1);
}

#[tokio::test]
async fn test_manhattan_degrades_to_empty_table() {
    let warehouse = Arc::new(FakeWarehouse::failing("connection reset"));
    let table = backend(warehouse.clone())
        .manhattan("GCST004131", PageRequest::default())
        .await
        .unwrap();

    assert_eq!(table.study_id, "GCST004131");
    assert!(table.associations.is_empty());
    assert_eq!(warehouse.calls(), 1);
}

#[tokio::test]
async fn test_manhattan_rows_keep_storage_order() {
    let warehouse = Arc::new(FakeWarehouse::with_rows(vec![
        manhattan_row("1_55505647_G_T", 1e-12),
        manhattan_row("2_21263900_G_A", 4e-9),
    ]));
    let table = backend(warehouse.clone())
        .manhattan("GCST004131", PageRequest::new(Some(1), Some(2)))
        .await
        .unwrap();

    let ids: Vec<String> = table
        .associations
        .iter()
        .map(|association| association.variant.id())
        .collect();
    assert_eq!(ids, vec!["1_55505647_G_T", "2_21263900_G_A"]);
    assert_eq!(table.associations[0].best_genes[0].gene.id, "ENSG00000169174");

    let query = warehouse.last_query().unwrap();
    assert!(query.sql().ends_with("LIMIT 2 OFFSET 2"));
    assert_eq!(
        query.param("study_id"),
        Some(&QueryParam::String("GCST004131".to_string()))
    );
}

#[tokio::test]
async fn test_every_warehouse_view_degrades() {
    let warehouse = Arc::new(FakeWarehouse::failing("timeout"));
    let backend = backend(warehouse.clone());
    let page = PageRequest::default();

    assert!(backend.phewas("1_100_A_G", page).await.unwrap().associations.is_empty());
    assert_eq!(backend.g2v_schema().await, Default::default());
    assert!(backend
        .studies_by_ids(&["GCST1".to_string()])
        .await
        .unwrap()
        .is_empty());
    assert!(backend
        .tag_variant_associations("1_100_A_G", page)
        .await
        .unwrap()
        .associations
        .is_empty());
    assert_eq!(backend.gecko("1", 0, 1_000).await.unwrap().count(), 0);
    assert!(backend.g2v("1_100_A_G").await.unwrap().associations.is_empty());
    assert_eq!(warehouse.calls(), 6);
}

#[tokio::test]
async fn test_tag_and_index_views_decode_both_sides() {
    let warehouse = Arc::new(FakeWarehouse::with_rows(vec![v2d_row(150), v2d_row(175)]));
    let backend = backend(warehouse);

    let index = backend
        .index_variant_associations("1_100_A_G", PageRequest::default())
        .await
        .unwrap();
    assert_eq!(index.associations.len(), 2);
    assert_eq!(index.associations[1].tag_variant.id(), "1_175_C_T");
    assert_eq!(index.associations[0].statistics.n_total, 59_957);

    let tag = backend
        .tag_variant_associations("1_150_C_T", PageRequest::default())
        .await
        .unwrap();
    assert_eq!(tag.associations[0].index_variant.rs_id.as_deref(), Some("rs100"));
}

#[tokio::test]
async fn test_gecko_region_validation_and_lazy_lines() {
    let warehouse = Arc::new(FakeWarehouse::with_rows(vec![
        gecko_row("7_1100_C_T"),
        gecko_row("broken"),
        gecko_row("7_1300_C_T"),
    ]));
    let backend = backend(warehouse.clone());

    let err = backend.gecko("7", 0, 2_000_001).await.unwrap_err();
    assert!(matches!(
        err,
        BackendError::Violation(Violation::InvalidRegion { .. })
    ));
    let err = backend.gecko("chr99", 0, 10).await.unwrap_err();
    assert!(matches!(
        err,
        BackendError::Violation(Violation::InvalidChromosome { .. })
    ));
    assert_eq!(warehouse.calls(), 0);

    let lines: Vec<_> = backend.gecko("chr7", 1_000, 2_000).await.unwrap().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].tag_variant.rs_id.as_deref(), Some("rs8"));
    assert_eq!(lines[0].gene.strand, Some(false));
    assert_eq!(
        warehouse.last_query().unwrap().param("chrom"),
        Some(&QueryParam::String("7".to_string()))
    );
}

#[tokio::test]
async fn test_blank_study_id_is_a_violation() {
    let warehouse = Arc::new(FakeWarehouse::empty());
    let err = backend(warehouse.clone())
        .studies_by_ids(&["GCST1".to_string(), "  ".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BackendError::Violation(Violation::InvalidStudy { .. })
    ));
    assert_eq!(warehouse.calls(), 0);
}
