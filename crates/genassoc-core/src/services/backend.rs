//! Backend facade: one operation per association view.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::domain::{
    Chromosome, G2VSchema, G2VTable, IndexVariantTable, ManhattanTable, PhewasTable, Region,
    SearchResultSet, Study, TagVariantTable, Variant, parse_study_id,
};
use crate::error::{BackendError, BackendResult};
use crate::mapper::{
    self, GeckoLines, row_to_index_variant_association, row_to_manhattan, row_to_phewas,
    row_to_study, row_to_tag_variant_association, rows_to_g2v_associations, rows_to_schema,
};
use crate::pagination::{PageRequest, Paginator};
use crate::ports::{DecodeError, Query, Row, SearchPort, WarehouseError, WarehousePort};
use crate::query::QueryBuilder;
use crate::services::SearchAggregator;

/// Entry point for every association view.
///
/// Inputs are validated before any storage access. Warehouse and decode
/// failures of the per-identifier views are logged and answered with an
/// empty result of the right shape; [`Backend::search`] and
/// [`Backend::validate_study_id`] propagate them instead.
pub struct Backend {
    warehouse: Arc<dyn WarehousePort>,
    queries: QueryBuilder,
    paginator: Paginator,
    search: SearchAggregator,
    max_region_window: u64,
}

impl Backend {
    pub fn new(
        config: BackendConfig,
        warehouse: Arc<dyn WarehousePort>,
        search: Arc<dyn SearchPort>,
    ) -> Self {
        let paginator = Paginator::new(config.pagination);
        Self {
            warehouse,
            queries: QueryBuilder::new(config.tables),
            paginator,
            search: SearchAggregator::new(search, config.search, paginator),
            max_region_window: config.max_region_window,
        }
    }

    async fn fetch(&self, view: &'static str, query: &Query) -> Result<Vec<Row>, WarehouseError> {
        debug!(view, params = query.params().len(), "Running warehouse query");
        self.warehouse.query(query).await
    }

    /// Run `query` and decode its rows, degrading any failure to `T::default()`.
    async fn load<T: Default>(
        &self,
        view: &'static str,
        query: Query,
        decode: impl FnOnce(&[Row]) -> Result<T, DecodeError>,
    ) -> T {
        let result = match self.fetch(view, &query).await {
            Ok(rows) => decode(&rows).map_err(WarehouseError::from),
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| {
            warn!(view, error = %e, "Warehouse query failed, returning empty result");
            T::default()
        })
    }

    /// Per-study summary statistics for one variant.
    pub async fn phewas(&self, variant_id: &str, page: PageRequest) -> BackendResult<PhewasTable> {
        let mut variant = Variant::parse(variant_id)?;
        let chromosome = Chromosome::parse(&variant.position.chromosome)?;
        // Shard table, `chrom` and `variant_id` must all use the canonical name.
        variant.position.chromosome = chromosome.to_string();
        let query = self
            .queries
            .phewas(&chromosome, &variant, self.paginator.warehouse(page));

        let associations = self
            .load("phewas", query, |rows| mapper::decode_all(rows, row_to_phewas))
            .await;
        Ok(PhewasTable {
            variant,
            associations,
        })
    }

    /// Available V2G evidence sources grouped by family.
    pub async fn g2v_schema(&self) -> G2VSchema {
        self.load("g2v_schema", self.queries.g2v_schema(), rows_to_schema)
            .await
    }

    /// Metadata of the given studies, in warehouse order. Unknown ids are
    /// simply absent from the result.
    pub async fn studies_by_ids(&self, study_ids: &[String]) -> BackendResult<Vec<Study>> {
        let ids = study_ids
            .iter()
            .map(|raw| parse_study_id(raw))
            .collect::<Result<Vec<_>, _>>()?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .load("studies", self.queries.studies(&ids), |rows| {
                mapper::decode_all(rows, row_to_study)
            })
            .await)
    }

    /// Association signals of one study, one per index variant.
    pub async fn manhattan(
        &self,
        study_id: &str,
        page: PageRequest,
    ) -> BackendResult<ManhattanTable> {
        let study_id = parse_study_id(study_id)?;
        let query = self
            .queries
            .manhattan(&study_id, self.paginator.warehouse(page));

        let associations = self
            .load("manhattan", query, |rows| {
                mapper::decode_all(rows, row_to_manhattan)
            })
            .await;
        Ok(ManhattanTable {
            study_id,
            associations,
        })
    }

    /// Tag variants of an index variant.
    pub async fn index_variant_associations(
        &self,
        variant_id: &str,
        page: PageRequest,
    ) -> BackendResult<IndexVariantTable> {
        let index_variant = Variant::parse(variant_id)?;
        let query = self
            .queries
            .index_variant_associations(&index_variant, self.paginator.warehouse(page));

        let associations = self
            .load("index_variant_associations", query, |rows| {
                mapper::decode_all(rows, row_to_index_variant_association)
            })
            .await;
        Ok(IndexVariantTable {
            index_variant,
            associations,
        })
    }

    /// Index variants of a tag variant.
    pub async fn tag_variant_associations(
        &self,
        variant_id: &str,
        page: PageRequest,
    ) -> BackendResult<TagVariantTable> {
        let tag_variant = Variant::parse(variant_id)?;
        let query = self
            .queries
            .tag_variant_associations(&tag_variant, self.paginator.warehouse(page));

        let associations = self
            .load("tag_variant_associations", query, |rows| {
                mapper::decode_all(rows, row_to_tag_variant_association)
            })
            .await;
        Ok(TagVariantTable {
            tag_variant,
            associations,
        })
    }

    /// Regional lines on `chromosome` between `start` and `end` (inclusive).
    ///
    /// The returned sequence decodes lazily and skips malformed rows.
    pub async fn gecko(&self, chromosome: &str, start: i64, end: i64) -> BackendResult<GeckoLines> {
        let chromosome = Chromosome::parse(chromosome)?;
        let region = Region::parse(start, end, self.max_region_window)?;
        let query = self.queries.gecko(&chromosome, region);

        match self.fetch("gecko", &query).await {
            Ok(rows) => Ok(GeckoLines::new(rows)),
            Err(e) => {
                warn!(view = "gecko", error = %e, "Warehouse query failed, returning empty result");
                Ok(GeckoLines::empty())
            }
        }
    }

    /// Scored gene evidence for one variant, one association per gene.
    pub async fn g2v(&self, variant_id: &str) -> BackendResult<G2VTable> {
        let variant = Variant::parse(variant_id)?;
        let query = self.queries.g2v(&variant);

        let associations = self
            .load("g2v", query, rows_to_g2v_associations)
            .await;
        Ok(G2VTable {
            variant,
            associations,
        })
    }

    /// Free-text search across studies, variants and genes.
    pub async fn search(&self, query: &str, page: PageRequest) -> BackendResult<SearchResultSet> {
        self.search.search(query, page).await
    }

    /// Confirm that a study exists, returning its normalised id.
    ///
    /// Storage failures are propagated rather than degraded.
    pub async fn validate_study_id(&self, study_id: &str) -> BackendResult<String> {
        let study_id = parse_study_id(study_id)?;
        let query = self.queries.studies(std::slice::from_ref(&study_id));
        let rows = self.fetch("validate_study_id", &query).await?;
        if rows.is_empty() {
            return Err(BackendError::UnknownStudy(study_id));
        }
        Ok(study_id)
    }
}
