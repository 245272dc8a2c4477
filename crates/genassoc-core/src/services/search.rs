//! Free-text search across studies, variants and genes.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::SearchIndices;
use crate::domain::{SearchCategory, SearchResultSet, Violation};
use crate::error::BackendResult;
use crate::mapper::{document_to_gene, document_to_study, document_to_variant};
use crate::pagination::{PageRequest, Paginator, SearchWindow};
use crate::ports::{
    DecodeError, SearchClause, SearchHits, SearchPort, SearchRequest, SearchResult,
};

const STUDY_TEXT_FIELDS: &[&str] = &["trait_reported", "pub_author", "pub_title", "trait_efos"];
const GENE_TEXT_FIELDS: &[&str] = &["gene_name"];

/// A validated search string in its two normalised forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms {
    /// Lowercased input, used for prefix clauses.
    pub prefix: String,
    /// Lowercased input with `-` spelled out as `and`, used for free text.
    pub free_text: String,
}

impl SearchTerms {
    /// Normalise a raw search string, rejecting blank input.
    pub fn parse(raw: &str) -> Result<Self, Violation> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Violation::EmptySearchQuery {
                input: raw.to_string(),
            });
        }
        let prefix = trimmed.to_lowercase();
        let free_text = prefix.replace('-', " and ");
        Ok(Self { prefix, free_text })
    }
}

/// Runs one search per category concurrently and merges the results.
///
/// Unlike the warehouse views this never degrades: if any of the three
/// searches fails, the whole search fails.
pub struct SearchAggregator {
    port: Arc<dyn SearchPort>,
    indices: SearchIndices,
    paginator: Paginator,
}

impl SearchAggregator {
    pub fn new(port: Arc<dyn SearchPort>, indices: SearchIndices, paginator: Paginator) -> Self {
        Self {
            port,
            indices,
            paginator,
        }
    }

    fn requests(&self, terms: &SearchTerms, window: SearchWindow) -> [SearchRequest; 3] {
        let request = |index: &str, should: Vec<SearchClause>| SearchRequest {
            index: index.to_string(),
            should,
            window,
        };
        [
            request(
                &self.indices.studies,
                vec![
                    SearchClause::prefix("study_id", &terms.prefix),
                    SearchClause::prefix("pmid", &terms.prefix),
                    SearchClause::free_text(STUDY_TEXT_FIELDS, &terms.free_text),
                ],
            ),
            request(
                &self.indices.variants,
                vec![
                    SearchClause::prefix("variant_id", &terms.prefix),
                    SearchClause::prefix("rs_id", &terms.prefix),
                ],
            ),
            request(
                &self.indices.genes,
                vec![
                    SearchClause::prefix("gene_id", &terms.prefix),
                    SearchClause::free_text(GENE_TEXT_FIELDS, &terms.free_text),
                ],
            ),
        ]
    }

    /// Search all three categories with one shared page window.
    pub async fn search(&self, raw: &str, page: PageRequest) -> BackendResult<SearchResultSet> {
        let terms = SearchTerms::parse(raw)?;
        let window = self.paginator.search(page);
        let [studies, variants, genes] = self.requests(&terms, window);

        debug!(query = %terms.prefix, from = window.from, size = window.size, "Searching");
        let (studies, variants, genes) = tokio::try_join!(
            self.port.search(&studies),
            self.port.search(&variants),
            self.port.search(&genes),
        )?;

        Ok(SearchResultSet {
            studies: category(studies, document_to_study)?,
            variants: category(variants, document_to_variant)?,
            genes: category(genes, document_to_gene)?,
        })
    }
}

fn category<T>(
    hits: SearchHits,
    decode: impl Fn(&Value) -> Result<T, DecodeError>,
) -> SearchResult<SearchCategory<T>> {
    let items = hits
        .documents
        .iter()
        .map(decode)
        .collect::<Result<Vec<_>, DecodeError>>()?;
    Ok(SearchCategory::new(hits.total, items))
}
