//! Result mapping: warehouse rows and search documents to domain records.
//!
//! Each record type has exactly one decode function. Decoding is positional
//! for warehouse rows and by field name for search documents; a cell or field
//! that cannot be decoded yields a [`DecodeError`](crate::ports::DecodeError).

mod documents;
mod g2v;
mod gecko;
mod rows;

pub use documents::{document_to_gene, document_to_study, document_to_variant};
pub use g2v::{row_to_schema_element, rows_to_g2v_associations, rows_to_schema};
pub use gecko::{GeckoLines, row_to_gecko_line};
pub use rows::{
    GENE_COLUMNS, row_to_gene, row_to_index_variant_association, row_to_manhattan, row_to_phewas,
    row_to_study, row_to_tag_variant_association,
};

use crate::ports::{DecodeError, Row};

/// Decode every row with `decode`, failing on the first bad row.
pub fn decode_all<T>(
    rows: &[Row],
    decode: impl Fn(&Row) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    rows.iter().map(decode).collect()
}
