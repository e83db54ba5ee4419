//! Shared search query models and helpers.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::search_const::{DEFAULT_SORT, EXACT_SEARCH, PAGE_SIZE};

/// Selected options per facet. A facet that is absent, or maps to an empty
/// set, does not restrict the result.
pub type FilterSelection = BTreeMap<String, BTreeSet<String>>;

/// What the user has asked for: search text plus facet selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchQuery {
    pub query_string: String,
    pub facet_filters: FilterSelection,
}

impl SearchQuery {
    pub fn is_selected(&self, facet: &str, option: &str) -> bool {
        self.facet_filters.get(facet).is_some_and(|options| options.contains(option))
    }

    pub fn select_option(&mut self, facet: &str, option: &str) {
        self.facet_filters.entry(facet.to_string()).or_default().insert(option.to_string());
    }

    /// Removes one option. The facet entry goes away with its last option.
    pub fn unselect_option(&mut self, facet: &str, option: &str) {
        if let Some(options) = self.facet_filters.get_mut(facet) {
            options.remove(option);
            if options.is_empty() {
                self.facet_filters.remove(facet);
            }
        }
    }

    pub fn toggle_option(&mut self, facet: &str, option: &str) {
        if self.is_selected(facet, option) {
            self.unselect_option(facet, option);
        } else {
            self.select_option(facet, option);
        }
    }

    pub fn clear_filters(&mut self) {
        self.facet_filters.clear();
    }

    pub fn has_filters(&self) -> bool {
        self.facet_filters.values().any(|options| !options.is_empty())
    }

    /// Drops facet entries with no options left.
    pub fn normalized(mut self) -> Self {
        self.facet_filters.retain(|_, options| !options.is_empty());
        self
    }
}

/// One request against the search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub per_page: usize,
    /// 1-based.
    pub page: usize,
    pub query: String,
    pub filters: FilterSelection,
    /// Name of a configured sorting; `None` orders by relevance.
    pub sort: Option<String>,
    pub is_exact_search: bool,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            per_page: PAGE_SIZE,
            page: 1,
            query: String::new(),
            filters: FilterSelection::new(),
            sort: Some(DEFAULT_SORT.to_string()),
            is_exact_search: EXACT_SEARCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unselecting_last_option_removes_facet() {
        let mut query = SearchQuery::default();
        query.select_option("Category", "Report");
        query.select_option("Category", "Thesis");
        query.unselect_option("Category", "Report");
        assert!(query.is_selected("Category", "Thesis"));
        query.unselect_option("Category", "Thesis");
        assert!(!query.facet_filters.contains_key("Category"));
        assert!(!query.has_filters());
    }

    #[test]
    fn toggle_flips_selection() {
        let mut query = SearchQuery::default();
        query.toggle_option("Year", "2020");
        assert!(query.is_selected("Year", "2020"));
        query.toggle_option("Year", "2020");
        assert_eq!(query, SearchQuery::default());
    }

    #[test]
    fn normalized_drops_empty_sets() {
        let mut query = SearchQuery::default();
        query.facet_filters.insert("Year".to_string(), BTreeSet::new());
        assert!(!query.has_filters());
        assert!(query.normalized().facet_filters.is_empty());
    }

    #[test]
    fn default_spec_is_first_page_by_year() {
        let spec = QuerySpec::default();
        assert_eq!(spec.per_page, 100);
        assert_eq!(spec.page, 1);
        assert_eq!(spec.sort.as_deref(), Some("year_name_asc"));
        assert!(spec.is_exact_search);
    }
}
