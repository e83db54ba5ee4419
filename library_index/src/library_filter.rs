//! The filter adapter: a document collection, the index built over it and
//! the filter state the user has selected.

use std::sync::Arc;

use common::document::Document;
use common::query_config::QueryConfig;
use common::search_const::{DEFAULT_SORT, EXACT_SEARCH, PAGE_SIZE};
use common::search_query::{FilterSelection, QuerySpec, SearchQuery};
use common::search_result::{ResultPage, SearchResultFacetItem};
use tracing::{debug, info};

use crate::backend::{SearchBackend, TantivyBackend};
use crate::error::{Error, Result};

/// Holds the loaded collection and the latest result page.
///
/// Every operation runs the query to completion before returning and only
/// then replaces the stored state, so a failed operation leaves the filter
/// exactly as it was.
pub struct LibraryFilter<B: SearchBackend = TantivyBackend> {
    backend: B,
    config: QueryConfig,
    documents: Arc<[Document]>,
    index: Option<B::Index>,
    query: SearchQuery,
    page: usize,
    sort: String,
    results: ResultPage,
}

impl Default for LibraryFilter<TantivyBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryFilter<TantivyBackend> {
    pub fn new() -> Self {
        Self::with_backend(TantivyBackend::default(), QueryConfig::library())
    }
}

/// Filter state a query is about to run with.
struct Pending {
    query: SearchQuery,
    page: usize,
    sort: String,
}

impl<B: SearchBackend> LibraryFilter<B> {
    pub fn with_backend(backend: B, config: QueryConfig) -> Self {
        Self {
            backend,
            config,
            documents: Arc::from(Vec::new()),
            index: None,
            query: SearchQuery::default(),
            page: 1,
            sort: DEFAULT_SORT.to_string(),
            results: ResultPage::default(),
        }
    }

    /// Replaces the collection, rebuilds the index and runs the default
    /// query: first page, no search text, no filters, newest first.
    pub fn load_documents(&mut self, documents: Vec<Document>) -> Result<&ResultPage> {
        let documents: Arc<[Document]> = documents.into();
        let index = self.backend.build_index(documents.clone(), &self.config)?;

        let pending = Pending { query: SearchQuery::default(), page: 1, sort: DEFAULT_SORT.to_string() };
        let results = self.backend.query(&index, &spec_for(&pending))?;

        info!("Loaded {} library documents, {} on the first page", documents.len(), results.items.len());
        self.documents = documents;
        self.index = Some(index);
        self.commit(pending, results);
        Ok(&self.results)
    }

    /// Replaces the whole selection and goes back to the first page.
    pub fn set_filters(&mut self, filters: FilterSelection) -> Result<&ResultPage> {
        for facet in filters.keys() {
            self.check_facet(facet)?;
        }
        let query = SearchQuery { query_string: self.query.query_string.clone(), facet_filters: filters }.normalized();
        self.requery(Pending { query, page: 1, sort: self.sort.clone() })
    }

    pub fn select_option(&mut self, facet: &str, option: &str) -> Result<&ResultPage> {
        self.check_facet(facet)?;
        let mut query = self.query.clone();
        query.select_option(facet, option);
        self.requery(Pending { query, page: 1, sort: self.sort.clone() })
    }

    /// Removes one selected option. Clearing the last option of a facet
    /// drops the facet from the selection.
    pub fn clear_filter_option(&mut self, facet: &str, option: &str) -> Result<&ResultPage> {
        self.check_facet(facet)?;
        let mut query = self.query.clone();
        query.unselect_option(facet, option);
        self.requery(Pending { query, page: 1, sort: self.sort.clone() })
    }

    pub fn reset_filters(&mut self) -> Result<&ResultPage> {
        let mut query = self.query.clone();
        query.clear_filters();
        self.requery(Pending { query, page: 1, sort: self.sort.clone() })
    }

    /// Replaces the search text, keeping the current filters.
    pub fn search(&mut self, text: &str) -> Result<&ResultPage> {
        let query = SearchQuery { query_string: text.to_string(), facet_filters: self.query.facet_filters.clone() };
        self.requery(Pending { query, page: 1, sort: self.sort.clone() })
    }

    /// Replaces text and filters together and shows `page`.
    pub fn apply_query(&mut self, query: SearchQuery, page: usize) -> Result<&ResultPage> {
        for facet in query.facet_filters.keys() {
            self.check_facet(facet)?;
        }
        self.requery(Pending { query: query.normalized(), page: page.max(1), sort: self.sort.clone() })
    }

    pub fn set_sort(&mut self, name: &str) -> Result<&ResultPage> {
        if self.config.sorting(name).is_none() {
            return Err(Error::UnknownSort(name.to_string()));
        }
        self.requery(Pending { query: self.query.clone(), page: 1, sort: name.to_string() })
    }

    /// Pages are 1-based; 0 is read as the first page.
    pub fn go_to_page(&mut self, page: usize) -> Result<&ResultPage> {
        self.requery(Pending { query: self.query.clone(), page: page.max(1), sort: self.sort.clone() })
    }

    pub fn results(&self) -> &ResultPage {
        &self.results
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.query.facet_filters
    }

    pub fn search_text(&self) -> &str {
        &self.query.query_string
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn sort(&self) -> &str {
        &self.sort
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    pub fn facet_title(&self, facet: &str) -> Option<&str> {
        self.config.facet_title(facet)
    }

    pub fn option_label(&self, option: &SearchResultFacetItem) -> String {
        option.label()
    }

    fn check_facet(&self, facet: &str) -> Result<()> {
        if self.config.aggregation(facet).is_none() {
            return Err(Error::UnknownFacet(facet.to_string()));
        }
        Ok(())
    }

    fn requery(&mut self, pending: Pending) -> Result<&ResultPage> {
        let index = self.index.as_ref().ok_or(Error::NotLoaded)?;
        let results = self.backend.query(index, &spec_for(&pending))?;
        debug!("Library filter now at page {} of {}", pending.page, results.pagination.page_count());
        self.commit(pending, results);
        Ok(&self.results)
    }

    fn commit(&mut self, pending: Pending, results: ResultPage) {
        self.query = pending.query;
        self.page = pending.page;
        self.sort = pending.sort;
        self.results = results;
    }
}

fn spec_for(pending: &Pending) -> QuerySpec {
    QuerySpec {
        per_page: PAGE_SIZE,
        page: pending.page,
        query: pending.query.query_string.clone(),
        filters: pending.query.facet_filters.clone(),
        sort: Some(pending.sort.clone()),
        is_exact_search: EXACT_SEARCH,
    }
}
