//! Combined free-text search results.

use serde::{Deserialize, Serialize};

use crate::domain::{Gene, Study, Variant};

/// One page of hits for a single category plus the category's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCategory<T> {
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> SearchCategory<T> {
    #[must_use]
    pub const fn new(total: u64, items: Vec<T>) -> Self {
        Self { total, items }
    }
}

/// Studies, variants and genes matching one query, all windowed alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultSet {
    pub studies: SearchCategory<Study>,
    pub variants: SearchCategory<Variant>,
    pub genes: SearchCategory<Gene>,
}
