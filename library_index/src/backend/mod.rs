//! The seam between the filter adapter and the search library.
//!
//! The adapter only ever builds an index from a document collection and runs
//! queries against it, so that is all [`SearchBackend`] exposes. Everything
//! about tokenization, matching and facet counting stays inside the
//! implementation. Ordering, paging and bucket trimming are plain functions
//! over the matched positions, so a backend only has to find the matches and
//! count facet options.

use std::collections::BTreeSet;
use std::sync::Arc;

use common::document::Document;
use common::query_config::{AggregationConfig, QueryConfig, SortConfig};
use common::search_query::QuerySpec;
use common::search_result::{Pagination, ResultPage, SearchResultFacetItem, SearchResultFacets};

use crate::error::{Error, Result};

mod ordering;
mod query_builder;
mod tantivy_backend;

pub use tantivy_backend::{TantivyBackend, TantivyIndex};

pub trait SearchBackend {
    type Index;

    /// Builds a fresh index over `documents`. Nothing is shared with any
    /// previously built index.
    fn build_index(&self, documents: Arc<[Document]>, config: &QueryConfig) -> Result<Self::Index>;

    fn query(&self, index: &Self::Index, spec: &QuerySpec) -> Result<ResultPage>;
}

/// A matched document: relevance score and position in the collection.
pub(crate) type Hit = (f32, usize);

/// Checks the filters and sort of `spec` against `config` and returns the
/// sorting to apply, `None` meaning relevance.
pub(crate) fn resolve_spec<'a>(config: &'a QueryConfig, spec: &QuerySpec) -> Result<Option<&'a SortConfig>> {
    if let Some(facet) = spec.filters.keys().find(|facet| config.aggregation(facet).is_none()) {
        return Err(Error::UnknownFacet(facet.clone()));
    }
    match &spec.sort {
        Some(name) => Ok(Some(config.sorting(name).ok_or_else(|| Error::UnknownSort(name.clone()))?)),
        None => Ok(None),
    }
}

/// Orders the hits, ties broken by collection order, and cuts out the
/// requested page. Returns the pagination and the page's documents.
pub(crate) fn page_of(mut hits: Vec<Hit>, documents: &[Document], sorting: Option<&SortConfig>, spec: &QuerySpec) -> (Pagination, Vec<Document>) {
    match sorting {
        Some(sorting) => hits.sort_by(|(_, a), (_, b)| {
            ordering::compare_documents(&documents[*a], &documents[*b], &sorting.keys).then(a.cmp(b))
        }),
        None => hits.sort_by(|(score_a, a), (score_b, b)| score_b.total_cmp(score_a).then(a.cmp(b))),
    }

    let total = hits.len();
    let page = spec.page.max(1);
    let items = hits
        .iter()
        .skip((page - 1).saturating_mul(spec.per_page))
        .take(spec.per_page)
        .map(|(_, position)| documents[*position].clone())
        .collect();
    (Pagination { page, per_page: spec.per_page, total }, items)
}

/// Option counts for one facet, most frequent first, cut to the configured
/// size. Selected options that no longer match are kept with a zero count so
/// they can still be unselected.
pub(crate) fn facet_buckets(
    counts: impl IntoIterator<Item = (String, u64)>,
    aggregation: &AggregationConfig,
    spec: &QuerySpec,
) -> SearchResultFacets {
    let selected = spec.filters.get(&aggregation.field);
    let mut values = counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(key, doc_count)| SearchResultFacetItem {
            selected: selected.is_some_and(|s| s.contains(&key)),
            key,
            doc_count,
        })
        .collect::<Vec<_>>();
    values.sort_by(|a, b| b.doc_count.cmp(&a.doc_count).then_with(|| a.key.cmp(&b.key)));
    values.truncate(aggregation.size);

    if let Some(selected) = selected {
        for option in selected {
            if !values.iter().any(|v| &v.key == option) {
                values.push(SearchResultFacetItem { key: option.clone(), doc_count: 0, selected: true });
            }
        }
    }

    SearchResultFacets {
        facet_field: aggregation.field.clone(),
        title: aggregation.title.clone(),
        facet_values: values,
    }
}

/// Rejects configurations the index cannot be built from.
pub fn validate_config(config: &QueryConfig) -> Result<()> {
    let mut seen = BTreeSet::new();
    for aggregation in &config.aggregations {
        if aggregation.field.trim().is_empty() {
            return Err(Error::config("aggregation with an empty field name"));
        }
        if !seen.insert(aggregation.field.as_str()) {
            return Err(Error::config(format!("aggregation {} declared twice", aggregation.field)));
        }
    }
    for (name, sorting) in &config.sortings {
        if sorting.keys.is_empty() {
            return Err(Error::config(format!("sorting {name} has no keys")));
        }
    }
    if config.searchable_fields.iter().any(|f| f.trim().is_empty()) {
        return Err(Error::config("searchable field with an empty name"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::search_query::FilterSelection;

    #[test]
    fn library_config_is_valid() {
        assert!(validate_config(&QueryConfig::library()).is_ok());
    }

    #[test]
    fn duplicate_facet_is_rejected() {
        let mut config = QueryConfig::library();
        config.aggregations.push(AggregationConfig::new("Year", "Again", 3));
        assert!(matches!(validate_config(&config), Err(Error::Config(_))));
    }

    #[test]
    fn empty_sorting_is_rejected() {
        let mut config = QueryConfig::library();
        config.sortings.insert("nothing".to_string(), SortConfig { keys: vec![] });
        assert!(matches!(validate_config(&config), Err(Error::Config(_))));
    }

    #[test]
    fn unknown_sort_and_facet_are_rejected() {
        let config = QueryConfig::library();
        let spec = QuerySpec { sort: Some("by_colour".to_string()), ..QuerySpec::default() };
        assert!(matches!(resolve_spec(&config, &spec), Err(Error::UnknownSort(_))));

        let mut filters = FilterSelection::new();
        filters.insert("Colour".to_string(), BTreeSet::from(["Red".to_string()]));
        let spec = QuerySpec { filters, ..QuerySpec::default() };
        assert!(matches!(resolve_spec(&config, &spec), Err(Error::UnknownFacet(_))));
    }

    #[test]
    fn buckets_are_ranked_cut_and_keep_selected_options() {
        let aggregation = AggregationConfig::new("Category", "Publication Type", 2);
        let mut filters = FilterSelection::new();
        filters.insert("Category".to_string(), BTreeSet::from(["Thesis".to_string()]));
        let spec = QuerySpec { filters, ..QuerySpec::default() };

        let counts = [("Report", 3), ("Book", 3), ("Journal Article", 5), ("Map", 1), ("Thesis", 0)]
            .into_iter()
            .map(|(key, count)| (key.to_string(), count));
        let facets = facet_buckets(counts, &aggregation, &spec);
        let keys = facets.facet_values.iter().map(|v| (v.key.as_str(), v.doc_count)).collect::<Vec<_>>();
        assert_eq!(keys, vec![("Journal Article", 5), ("Book", 3), ("Thesis", 0)]);
        assert!(facets.facet_values[2].selected);
    }

    #[test]
    fn pages_are_one_based_and_ties_keep_collection_order() {
        let documents = (0i64..5)
            .map(|i| Document::new().with("Title", "Same").with("Year", 2000 + i / 2))
            .collect::<Vec<_>>();
        let hits = (0..5).map(|i| (0.0, i)).collect::<Vec<_>>();
        let sorting = QueryConfig::library().sorting("year_name_asc").cloned();
        let spec = QuerySpec { per_page: 2, page: 0, ..QuerySpec::default() };

        let (pagination, items) = page_of(hits, &documents, sorting.as_ref(), &spec);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.total, 5);
        assert_eq!(items, vec![documents[4].clone(), documents[2].clone()]);
    }
}
