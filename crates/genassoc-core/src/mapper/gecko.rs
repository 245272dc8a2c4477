//! Lazy decoding of regional (Gecko) lines.

use std::fmt;
use std::vec::IntoIter;

use tracing::warn;

use crate::domain::GeckoLine;
use crate::mapper::rows::{GENE_COLUMNS, parse_stored_variant, row_to_gene};
use crate::ports::{DecodeError, Row};

const GENE_OFFSET: usize = 4;
const STUDY_ID: usize = GENE_OFFSET + GENE_COLUMNS;

pub fn row_to_gecko_line(row: &Row) -> Result<GeckoLine, DecodeError> {
    Ok(GeckoLine {
        index_variant: parse_stored_variant(row, 0, row.non_empty_string(1)?)?,
        tag_variant: parse_stored_variant(row, 2, row.non_empty_string(3)?)?,
        gene: row_to_gene(row, GENE_OFFSET)?,
        study_id: row.string(STUDY_ID)?,
        r2: row.opt_f64(STUDY_ID + 1)?,
        posterior_probability: row.opt_f64(STUDY_ID + 2)?,
        pval: row.opt_f64(STUDY_ID + 3)?,
        overall_score: row.f64(STUDY_ID + 4)?,
    })
}

/// Single-pass sequence of regional lines.
///
/// Rows are decoded only as the sequence is advanced. A row that fails to
/// decode is logged and skipped, so one bad line never hides the rest of
/// the region. The sequence cannot be restarted.
pub struct GeckoLines {
    rows: IntoIter<Row>,
    skipped: usize,
}

impl GeckoLines {
    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: rows.into_iter(),
            skipped: 0,
        }
    }

    /// A sequence with no lines.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Number of malformed rows skipped so far.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for GeckoLines {
    type Item = GeckoLine;

    fn next(&mut self) -> Option<Self::Item> {
        for row in self.rows.by_ref() {
            match row_to_gecko_line(&row) {
                Ok(line) => return Some(line),
                Err(e) => {
                    self.skipped += 1;
                    warn!(error = %e, "Skipping malformed regional line");
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.rows.size_hint().1)
    }
}

impl fmt::Debug for GeckoLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeckoLines")
            .field("remaining", &self.rows.len())
            .field("skipped", &self.skipped)
            .finish()
    }
}
