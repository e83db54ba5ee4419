//! The library filter behind the library page, and the handles its
//! components share.

use anyhow::Context;
use dioxus::logger::tracing;
use dioxus::prelude::*;

use common::search_query::SearchQuery;
use common::search_result::{ResultPage, SearchResultFacetItem, SearchResultFacets};
use library_index::LibraryFilter;
use library_index::catalog;

/// The prepared catalog, as written by `create-library-index`.
const LIBRARY_INDEX: &str = include_str!("../../assets/library-index.json");

pub fn load_library() -> anyhow::Result<LibraryFilter> {
    let documents = catalog::parse_documents(LIBRARY_INDEX).context("parsing the bundled library index")?;
    let mut filter = LibraryFilter::new();
    let page = filter.load_documents(documents).context("indexing the library")?;
    tracing::info!("library loaded: {} documents", page.pagination.total);
    Ok(filter)
}

#[derive(Clone, Copy)]
pub struct LibraryContext {
    pub library: ReadSignal<Result<LibraryFilter, String>>,
    /// Text and filters as they are in the url.
    pub query: ReadSignal<SearchQuery>,
    pub page: ReadSignal<usize>,
    pub results: ReadSignal<ResultPage>,
    pub set_query: Callback<SearchQuery>,
    pub set_page: Callback<usize>,
}

impl LibraryContext {
    /// Display title of a facet, as configured in the loaded filter.
    pub fn facet_title(&self, facet: &SearchResultFacets) -> String {
        self.library
            .peek()
            .as_ref()
            .ok()
            .and_then(|filter| filter.facet_title(&facet.facet_field).map(str::to_string))
            .unwrap_or_else(|| facet.label().to_string())
    }

    pub fn option_label(&self, item: &SearchResultFacetItem) -> String {
        match self.library.peek().as_ref() {
            Ok(filter) => filter.option_label(item),
            Err(_) => item.label(),
        }
    }

    pub fn toggle_option(&self, facet: &str, option: &str) {
        let mut query = self.query.read().clone();
        query.toggle_option(facet, option);
        self.set_query.call(query);
    }

    pub fn clear_option(&self, facet: &str, option: &str) {
        let mut query = self.query.read().clone();
        query.unselect_option(facet, option);
        self.set_query.call(query);
    }

    pub fn clear_filters(&self) {
        let mut query = self.query.read().clone();
        query.clear_filters();
        self.set_query.call(query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_loads() {
        let filter = load_library().unwrap();
        let results = filter.results();
        assert!(!results.is_empty());
        assert_eq!(results.pagination.total, filter.documents().len());
        assert_eq!(results.aggregations.len(), 5);
        assert_eq!(filter.facet_title("Habitat_type"), Some("Habitat Type"));

        let years = results.items.iter().map(|d| d.year().unwrap_or_default()).collect::<Vec<_>>();
        assert!(years.windows(2).all(|w| w[0] >= w[1]));
    }
}
