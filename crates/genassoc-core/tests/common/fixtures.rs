//! Row and document fixtures shaped like warehouse and index output.

use genassoc_core::Row;
use serde_json::{Value, json};

pub fn manhattan_row(index_variant_id: &str, pval: f64) -> Row {
    Row::new(vec![
        json!(index_variant_id),
        json!("rs11591147"),
        json!(pval),
        json!(3),
        json!(12),
        json!(40),
        json!(["ENSG00000169174"]),
        json!(["PCSK9"]),
        json!([0.87]),
    ])
}

/// A by-position row: index `1_100_A_G`, tag `1_<tag_position>_C_T`.
pub fn v2d_row(tag_position: u64) -> Row {
    let mut cells = vec![
        json!("1"),
        json!(100),
        json!("A"),
        json!("G"),
        json!("rs100"),
        json!("1"),
        json!(tag_position),
        json!("C"),
        json!("T"),
        Value::Null,
        json!("GCST004131"),
        json!(1e-9),
        json!(59957),
        json!(0),
        json!(1.0),
    ];
    cells.extend(std::iter::repeat_n(Value::Null, 14));
    Row::new(cells)
}

pub fn gecko_row(tag_variant_id: &str) -> Row {
    Row::new(vec![
        json!("7_1000_A_G"),
        json!("rs7"),
        json!(tag_variant_id),
        json!("rs8"),
        json!("ENSG7"),
        json!("GENE7"),
        json!("protein_coding"),
        json!("7"),
        json!(1_500),
        json!(1_200),
        json!(1_800),
        json!(0),
        json!([1_200, 1_800]),
        json!("GCST9"),
        json!(0.8),
        json!(0.1),
        json!(1e-10),
        json!(0.5),
    ])
}

pub fn gene_document(id: &str, name: &str) -> Value {
    json!({
        "gene_id": id,
        "gene_name": name,
        "biotype": "protein_coding",
        "chr": "13",
        "start": 32315474,
        "end": 32400266,
        "tss": 32315474,
        "fwdstrand": 1,
        "exons": [32315474, 32315667]
    })
}

pub fn study_document(id: &str) -> Value {
    json!({
        "study_id": id,
        "trait_reported": "Breast cancer",
        "pmid": "PMID:29059683",
        "n_initial": 228951,
        "n_cases": 122977
    })
}

pub fn variant_document(id: &str, chromosome: &str, position: u64) -> Value {
    json!({
        "variant_id": id,
        "chr_id": chromosome,
        "position": position,
        "ref_allele": "A",
        "alt_allele": "G",
        "rs_id": "rs1"
    })
}
