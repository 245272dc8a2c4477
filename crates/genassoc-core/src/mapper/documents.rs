//! Decoders for search index documents.
//!
//! Documents are `_source` objects. Unknown fields are ignored.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{Gene, Position, Study, Variant};
use crate::ports::DecodeError;

fn decode<T: DeserializeOwned>(document: &Value, expected: &'static str) -> Result<T, DecodeError> {
    T::deserialize(document).map_err(|e| DecodeError::new(format!("document ({e})"), expected))
}

#[derive(Debug, Deserialize)]
struct VariantDocument {
    chr_id: String,
    position: u64,
    ref_allele: String,
    alt_allele: String,
    #[serde(default)]
    rs_id: Option<String>,
    #[serde(default)]
    gene_id_any: Option<String>,
    #[serde(default)]
    gene_id_prot_coding: Option<String>,
}

/// Integers and booleans are both used for the strand flag; exons arrive
/// either as an array or as its JSON text.
#[derive(Debug, Deserialize)]
struct GeneDocument {
    gene_id: String,
    #[serde(default)]
    gene_name: Option<String>,
    #[serde(default)]
    biotype: Option<String>,
    #[serde(default)]
    chr: Option<String>,
    #[serde(default)]
    tss: Option<u64>,
    #[serde(default)]
    start: Option<u64>,
    #[serde(default)]
    end: Option<u64>,
    #[serde(default)]
    fwdstrand: Option<Value>,
    #[serde(default)]
    exons: Option<Value>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

pub fn document_to_study(document: &Value) -> Result<Study, DecodeError> {
    decode(document, "study document")
}

pub fn document_to_variant(document: &Value) -> Result<Variant, DecodeError> {
    let doc: VariantDocument = decode(document, "variant document")?;
    let mut variant = Variant::new(
        Position::new(doc.chr_id, doc.position),
        doc.ref_allele,
        doc.alt_allele,
    )
    .with_rs_id(non_empty(doc.rs_id));
    variant.nearest_gene_id = non_empty(doc.gene_id_any);
    variant.nearest_coding_gene_id = non_empty(doc.gene_id_prot_coding);
    Ok(variant)
}

pub fn document_to_gene(document: &Value) -> Result<Gene, DecodeError> {
    let doc: GeneDocument = decode(document, "gene document")?;

    let strand = match doc.fwdstrand {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) if n.as_u64() == Some(1) => Some(true),
        Some(Value::Number(n)) if n.as_u64() == Some(0) => Some(false),
        Some(_) => return Err(DecodeError::new("document field 'fwdstrand'", "Bool")),
    };
    let exons = match doc.exons {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(text)) if text.is_empty() => Vec::new(),
        Some(Value::String(text)) => serde_json::from_str(&text)
            .map_err(|_| DecodeError::new("document field 'exons'", "Array(UInt64)"))?,
        Some(other) => Vec::<u64>::deserialize(&other)
            .map_err(|_| DecodeError::new("document field 'exons'", "Array(UInt64)"))?,
    };

    Ok(Gene {
        id: doc.gene_id,
        symbol: non_empty(doc.gene_name),
        start: doc.start,
        end: doc.end,
        tss: doc.tss,
        chromosome: non_empty(doc.chr),
        bio_type: non_empty(doc.biotype),
        strand,
        exons,
    })
}
