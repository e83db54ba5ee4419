//! Search backend over an in-memory Tantivy index.
//!
//! Each searchable field becomes a tokenized text field and each facet a
//! Tantivy facet field, so matching and facet counting are done by Tantivy.
//! Documents are not stored in the index; a stored position points back into
//! the collection the index was built from.

use std::collections::BTreeMap;
use std::sync::Arc;

use common::document::Document;
use common::query_config::{AggregationConfig, QueryConfig};
use common::search_query::{FilterSelection, QuerySpec};
use common::search_result::{ResultPage, SearchResultFacets};
use tantivy::collector::{FacetCollector, TopDocs};
use tantivy::query::Query;
use tantivy::schema::{Facet, FacetOptions, Field, STORED, Schema, TEXT};
use tantivy::{DocAddress, Index, IndexReader, IndexWriter, ReloadPolicy, Score, Searcher, TantivyDocument};
use tracing::{debug, info};

use super::query_builder::{all_of, facet_filter, facet_path, text_query};
use super::{Hit, SearchBackend, facet_buckets, page_of, resolve_spec, validate_config};
use crate::error::{Error, Result};

const POSITION_FIELD: &str = "position";
const SEARCH_FIELD_PREFIX: &str = "search_";
const FACET_FIELD_PREFIX: &str = "facet_";

#[derive(Debug, Clone)]
pub struct TantivyBackend {
    writer_memory_budget: usize,
}

impl Default for TantivyBackend {
    fn default() -> Self {
        Self { writer_memory_budget: 20_000_000 }
    }
}

impl TantivyBackend {
    pub fn with_memory_budget(writer_memory_budget: usize) -> Self {
        Self { writer_memory_budget }
    }
}

/// Field handles for the index schema
#[derive(Clone)]
struct IndexFields {
    position: Field,
    searchable: Vec<Field>,
    facets: BTreeMap<String, FacetField>,
}

#[derive(Clone)]
struct FacetField {
    field: Field,
    field_name: String,
    config: AggregationConfig,
}

/// A built index together with the collection it was built from.
pub struct TantivyIndex {
    reader: IndexReader,
    fields: IndexFields,
    documents: Arc<[Document]>,
    config: QueryConfig,
}

impl TantivyIndex {
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }
}

impl std::fmt::Debug for TantivyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TantivyIndex")
            .field("documents", &self.documents.len())
            .field("facets", &self.fields.facets.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn build_schema(config: &QueryConfig) -> (Schema, IndexFields) {
    let mut builder = Schema::builder();
    let position = builder.add_u64_field(POSITION_FIELD, STORED);
    let searchable = config
        .searchable_fields
        .iter()
        .map(|name| builder.add_text_field(&format!("{SEARCH_FIELD_PREFIX}{name}"), TEXT))
        .collect();
    let facets = config
        .aggregations
        .iter()
        .map(|aggregation| {
            let field_name = format!("{FACET_FIELD_PREFIX}{}", aggregation.field);
            let field = builder.add_facet_field(&field_name, FacetOptions::default());
            (aggregation.field.clone(), FacetField { field, field_name, config: aggregation.clone() })
        })
        .collect();
    (builder.build(), IndexFields { position, searchable, facets })
}

fn to_tantivy_document(position: usize, document: &Document, config: &QueryConfig, fields: &IndexFields) -> TantivyDocument {
    let mut doc = TantivyDocument::new();
    doc.add_u64(fields.position, position as u64);
    for (name, field) in config.searchable_fields.iter().zip(&fields.searchable) {
        if let Some(value) = document.get(name) {
            for text in value.search_texts() {
                doc.add_text(*field, &text);
            }
        }
    }
    for (name, facet) in &fields.facets {
        if let Some(value) = document.get(name) {
            for key in value.facet_keys() {
                doc.add_facet(facet.field, facet_path(&key));
            }
        }
    }
    doc
}

impl SearchBackend for TantivyBackend {
    type Index = TantivyIndex;

    fn build_index(&self, documents: Arc<[Document]>, config: &QueryConfig) -> Result<TantivyIndex> {
        validate_config(config)?;
        let (schema, fields) = build_schema(config);
        let index = Index::create_in_ram(schema);

        // a single indexing thread keeps the whole collection in one segment
        let mut writer: IndexWriter = index.writer_with_num_threads(1, self.writer_memory_budget)?;
        for (position, document) in documents.iter().enumerate() {
            writer.add_document(to_tantivy_document(position, document, config, &fields))?;
        }
        writer.commit()?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        info!("Built library index over {} documents", documents.len());
        Ok(TantivyIndex { reader, fields, documents, config: config.clone() })
    }

    fn query(&self, index: &TantivyIndex, spec: &QuerySpec) -> Result<ResultPage> {
        let sorting = resolve_spec(&index.config, spec)?;

        let searcher = index.reader.searcher();
        let query = build_query(index, spec, None);
        let hits = collect_positions(&searcher, query.as_ref(), index)?;
        let (pagination, items) = page_of(hits, &index.documents, sorting, spec);

        let mut aggregations = Vec::with_capacity(index.fields.facets.len());
        for aggregation in &index.config.aggregations {
            if let Some(facet) = index.fields.facets.get(&aggregation.field) {
                aggregations.push(count_facet(&searcher, index, spec, facet)?);
            }
        }

        debug!(
            "Library query {:?} with filters {:?}: {} matches, page {}",
            spec.query, spec.filters, pagination.total, pagination.page
        );

        Ok(ResultPage { pagination, items, aggregations })
    }
}

/// Text query plus facet filters. `skip_facet` leaves one facet's own
/// selection out, for counting a disjunctive facet.
fn build_query(index: &TantivyIndex, spec: &QuerySpec, skip_facet: Option<&str>) -> Box<dyn Query> {
    let mut clauses: Vec<Box<dyn Query>> = Vec::new();
    if let Some(text) = text_query(&index.fields.searchable, &spec.query, spec.is_exact_search) {
        clauses.push(text);
    }
    clauses.extend(filter_clauses(index, &spec.filters, skip_facet));
    all_of(clauses)
}

fn filter_clauses(index: &TantivyIndex, filters: &FilterSelection, skip_facet: Option<&str>) -> Vec<Box<dyn Query>> {
    filters
        .iter()
        .filter(|(name, _)| skip_facet != Some(String::as_str(name)))
        .filter_map(|(name, options)| {
            let facet = index.fields.facets.get(name)?;
            facet_filter(facet.field, options, facet.config.conjunction)
        })
        .collect()
}

fn collect_positions(searcher: &Searcher, query: &dyn Query, index: &TantivyIndex) -> Result<Vec<Hit>> {
    use tantivy::schema::Value;

    if index.documents.is_empty() {
        return Ok(Vec::new());
    }
    let top_docs: Vec<(Score, DocAddress)> = searcher.search(query, &TopDocs::with_limit(index.documents.len()))?;

    let mut hits = Vec::with_capacity(top_docs.len());
    for (score, address) in top_docs {
        let doc: TantivyDocument = searcher.doc(address)?;
        let position = doc
            .get_first(index.fields.position)
            .and_then(|v| v.as_u64())
            .ok_or_else(|| Error::config("indexed document without a position"))?;
        hits.push((score, position as usize));
    }
    Ok(hits)
}

/// Counts one facet's options over the documents matching `spec`. A
/// disjunctive facet is counted without its own selection.
fn count_facet(searcher: &Searcher, index: &TantivyIndex, spec: &QuerySpec, facet: &FacetField) -> Result<SearchResultFacets> {
    let aggregation = &facet.config;
    let skip = if aggregation.conjunction { None } else { Some(aggregation.field.as_str()) };
    let query = build_query(index, spec, skip);

    let mut collector = FacetCollector::for_field(&facet.field_name);
    collector.add_facet(Facet::root());
    let counts = searcher.search(query.as_ref(), &collector)?;

    let counts = counts
        .get(Facet::root())
        .filter_map(|(facet, count)| Some((facet.to_path().last()?.to_string(), count)))
        .collect::<Vec<_>>();
    Ok(facet_buckets(counts, aggregation, spec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::query_config::SortKey;
    use common::search_query::SearchQuery;

    fn doc(id: &str, title: &str, year: i64, category: &str, habitats: Vec<&str>) -> Document {
        Document::new()
            .with("ID", id)
            .with("Title", title)
            .with("Year", year)
            .with("Category", category)
            .with("Access_Rights", "Open")
            .with("Habitat_type", habitats)
            .with("Abstract_Description", format!("{title} in the Burdekin catchment"))
    }

    fn fixture() -> TantivyIndex {
        let docs = vec![
            doc("1", "Mangrove dieback", 2018, "Report", vec!["Mangroves"]),
            doc("2", "Seagrass monitoring", 2020, "Journal Article", vec!["Seagrass", "Estuary"]),
            doc("3", "Estuary fish nurseries", 2020, "Report", vec!["Estuary", "Mangroves"]),
            doc("4", "Coral bleaching review", 2016, "Thesis", vec!["Coral reef"]),
        ];
        TantivyBackend::default().build_index(docs.into(), &QueryConfig::library()).unwrap()
    }

    fn spec() -> QuerySpec {
        QuerySpec::default()
    }

    #[test]
    fn default_query_orders_by_year_then_title() {
        let index = fixture();
        assert_eq!(index.num_docs(), 4);
        let page = TantivyBackend::default().query(&index, &spec()).unwrap();
        assert_eq!(
            page.titles(),
            vec!["Estuary fish nurseries", "Seagrass monitoring", "Mangrove dieback", "Coral bleaching review"]
        );
        assert_eq!(page.pagination.total, 4);
    }

    #[test]
    fn exact_search_matches_whole_terms_only() {
        let index = fixture();
        let backend = TantivyBackend::default();

        let page = backend.query(&index, &QuerySpec { query: "seagrass".to_string(), ..spec() }).unwrap();
        assert_eq!(page.titles(), vec!["Seagrass monitoring"]);

        let partial = backend.query(&index, &QuerySpec { query: "seagr".to_string(), ..spec() }).unwrap();
        assert!(partial.is_empty());

        let fuzzy = backend
            .query(&index, &QuerySpec { query: "seagr".to_string(), is_exact_search: false, ..spec() })
            .unwrap();
        assert_eq!(fuzzy.titles(), vec!["Seagrass monitoring"]);
    }

    #[test]
    fn every_search_token_must_match() {
        let index = fixture();
        let page = TantivyBackend::default()
            .query(&index, &QuerySpec { query: "Estuary 2018".to_string(), ..spec() })
            .unwrap();
        assert!(page.is_empty());

        let year = TantivyBackend::default()
            .query(&index, &QuerySpec { query: "burdekin 2018".to_string(), ..spec() })
            .unwrap();
        assert_eq!(year.titles(), vec!["Mangrove dieback"]);
    }

    #[test]
    fn conjunctive_facet_requires_every_option() {
        let index = fixture();
        let mut query = SearchQuery::default();
        query.select_option("Habitat_type", "Estuary");
        query.select_option("Habitat_type", "Mangroves");
        let page = TantivyBackend::default()
            .query(&index, &QuerySpec { filters: query.facet_filters, ..spec() })
            .unwrap();
        assert_eq!(page.titles(), vec!["Estuary fish nurseries"]);
    }

    #[test]
    fn disjunctive_facet_accepts_any_option_and_keeps_sibling_counts() {
        let mut config = QueryConfig::library();
        for aggregation in config.aggregations.iter_mut() {
            if aggregation.field == "Category" {
                aggregation.conjunction = false;
            }
        }
        let docs = fixture().documents().to_vec();
        let backend = TantivyBackend::default();
        let index = backend.build_index(docs.into(), &config).unwrap();

        let mut query = SearchQuery::default();
        query.select_option("Category", "Thesis");
        query.select_option("Category", "Journal Article");
        let page = backend.query(&index, &QuerySpec { filters: query.facet_filters, ..spec() }).unwrap();
        assert_eq!(page.titles(), vec!["Seagrass monitoring", "Coral bleaching review"]);

        let category = page.facet("Category").unwrap();
        let report = category.facet_values.iter().find(|v| v.key == "Report").unwrap();
        assert_eq!(report.doc_count, 2);
        assert!(!report.selected);
        assert!(category.facet_values.iter().find(|v| v.key == "Thesis").unwrap().selected);
    }

    #[test]
    fn facet_counts_sorted_and_truncated_to_size() {
        let index = fixture();
        let page = TantivyBackend::default().query(&index, &spec()).unwrap();

        let years = page.facet("Year").unwrap();
        assert_eq!(years.title, "Year of Publication");
        assert_eq!(years.facet_values[0].label(), "2020(2)");

        let habitats = page.facet("Habitat_type").unwrap();
        let keys = habitats.facet_values.iter().map(|v| v.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["Estuary", "Mangroves", "Coral reef", "Seagrass"]);

        let mut small = QueryConfig::library();
        small.aggregations.retain(|a| a.field == "Habitat_type");
        small.aggregations[0].size = 1;
        let backend = TantivyBackend::default();
        let small_index = backend.build_index(index.documents().to_vec().into(), &small).unwrap();
        let page = backend.query(&small_index, &spec()).unwrap();
        assert_eq!(page.aggregations.len(), 1);
        assert_eq!(page.aggregations[0].facet_values.len(), 1);
    }

    #[test]
    fn selected_option_without_matches_is_kept() {
        let index = fixture();
        let mut query = SearchQuery::default();
        query.select_option("Category", "Thesis");
        let page = TantivyBackend::default()
            .query(&index, &QuerySpec { query: "seagrass".to_string(), filters: query.facet_filters, ..spec() })
            .unwrap();
        assert!(page.is_empty());
        let thesis = page.facet("Category").unwrap().facet_values.iter().find(|v| v.key == "Thesis").unwrap();
        assert_eq!(thesis.doc_count, 0);
        assert!(thesis.selected);
    }

    #[test]
    fn pages_split_the_sorted_list() {
        let index = fixture();
        let backend = TantivyBackend::default();
        let second = backend.query(&index, &QuerySpec { per_page: 3, page: 2, ..spec() }).unwrap();
        assert_eq!(second.titles(), vec!["Coral bleaching review"]);
        assert_eq!(second.pagination.page_count(), 2);

        let beyond = backend.query(&index, &QuerySpec { per_page: 3, page: 5, ..spec() }).unwrap();
        assert!(beyond.is_empty());
        assert_eq!(beyond.pagination.total, 4);
    }

    #[test]
    fn relevance_order_without_sort() {
        let index = fixture();
        let page = TantivyBackend::default()
            .query(&index, &QuerySpec { query: "catchment estuary".to_string(), sort: None, ..spec() })
            .unwrap();
        assert_eq!(page.titles(), vec!["Estuary fish nurseries"]);

        let all = TantivyBackend::default()
            .query(&index, &QuerySpec { query: "catchment".to_string(), sort: None, ..spec() })
            .unwrap();
        assert_eq!(all.pagination.total, 4);
    }

    #[test]
    fn unknown_facet_and_sort_are_errors() {
        let index = fixture();
        let backend = TantivyBackend::default();

        let mut query = SearchQuery::default();
        query.select_option("Region", "Wet Tropics");
        let err = backend.query(&index, &QuerySpec { filters: query.facet_filters, ..spec() }).unwrap_err();
        assert!(matches!(err, Error::UnknownFacet(f) if f == "Region"));

        let err = backend.query(&index, &QuerySpec { sort: Some("year_asc".to_string()), ..spec() }).unwrap_err();
        assert!(matches!(err, Error::UnknownSort(_)));
    }

    #[test]
    fn empty_collection_builds_and_queries() {
        let backend = TantivyBackend::default();
        let index = backend.build_index(Vec::<Document>::new().into(), &QueryConfig::library()).unwrap();
        let page = backend.query(&index, &spec()).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert!(page.aggregations.iter().all(|a| a.facet_values.is_empty()));
    }

    #[test]
    fn name_sort_ignores_year() {
        let index = fixture();
        let page = TantivyBackend::default()
            .query(&index, &QuerySpec { sort: Some("name_asc".to_string()), ..spec() })
            .unwrap();
        assert_eq!(page.titles()[0], "Coral bleaching review");
        assert_eq!(index.config.sorting("name_asc").unwrap().keys, vec![SortKey::asc("Title")]);
    }
}
