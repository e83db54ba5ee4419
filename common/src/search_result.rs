use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::search_const::PAGE_SIZE;


/// The result of one query: a page of documents plus facet listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub pagination: Pagination,
    pub items: Vec<Document>,
    pub aggregations: Vec<SearchResultFacets>,
}

impl Default for ResultPage {
    fn default() -> Self {
        Self::empty(PAGE_SIZE)
    }
}

impl ResultPage {
    pub fn empty(per_page: usize) -> Self {
        Self {
            pagination: Pagination { page: 1, per_page, total: 0 },
            items: Vec::new(),
            aggregations: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn facet(&self, field: &str) -> Option<&SearchResultFacets> {
        self.aggregations.iter().find(|f| f.facet_field == field)
    }

    /// Titles of the documents on this page, in order.
    pub fn titles(&self) -> Vec<&str> {
        self.items.iter().map(|d| d.title().unwrap_or_default()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    /// Matching documents across all pages.
    pub total: usize,
}

impl Pagination {
    pub fn page_count(&self) -> usize {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// 1-based position of the first item of this page.
    pub fn first_index(&self) -> usize {
        (self.page.saturating_sub(1)) * self.per_page + 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultFacets {
    pub facet_field: String,
    pub title: String,
    pub facet_values: Vec<SearchResultFacetItem>,
}

impl SearchResultFacets {
    pub fn label(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultFacetItem {
    pub key: String,
    pub doc_count: u64,
    pub selected: bool,
}

impl SearchResultFacetItem {
    /// Option label shown in the filter panel, e.g. `Open(12)`.
    pub fn label(&self) -> String {
        format!("{}({})", self.key, self.doc_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_label_appends_count() {
        let item = SearchResultFacetItem { key: "Open".to_string(), doc_count: 12, selected: false };
        assert_eq!(item.label(), "Open(12)");
    }

    #[test]
    fn pagination_counts_partial_pages() {
        let p = Pagination { page: 2, per_page: 100, total: 250 };
        assert_eq!(p.page_count(), 3);
        assert!(p.has_previous());
        assert!(p.has_next());
        assert_eq!(p.first_index(), 101);

        let last = Pagination { page: 3, ..p };
        assert!(!last.has_next());
        assert_eq!(Pagination { page: 1, per_page: 0, total: 5 }.page_count(), 0);
    }
}
