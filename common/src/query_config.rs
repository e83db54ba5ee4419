//! Facet, sort and searchable-field configuration handed to the search index.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::fields;
use crate::search_const::{DEFAULT_SORT, NAME_SORT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// How a sort key compares values. Numeric keys compare integers and treat a
/// value without one as missing; text keys compare the display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    #[default]
    Text,
    Numeric,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub order: SortOrder,
    #[serde(default)]
    pub kind: SortKind,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self { field: field.into(), order: SortOrder::Asc, kind: SortKind::Text }
    }
    pub fn desc(field: impl Into<String>) -> Self {
        Self { field: field.into(), order: SortOrder::Desc, kind: SortKind::Text }
    }

    pub fn numeric(mut self) -> Self {
        self.kind = SortKind::Numeric;
        self
    }
}

/// A named ordering: compare by the first key, break ties with the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub keys: Vec<SortKey>,
}

/// A filterable facet.
///
/// `size` is how many options the index lists for the facet. Listing fewer
/// options than the field really has truncates the filter panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    pub field: String,
    pub title: String,
    pub size: usize,
    /// When true a document must carry every selected option of this facet,
    /// otherwise any one of them.
    #[serde(default = "default_conjunction")]
    pub conjunction: bool,
}

fn default_conjunction() -> bool {
    true
}

impl AggregationConfig {
    pub fn new(field: impl Into<String>, title: impl Into<String>, size: usize) -> Self {
        Self { field: field.into(), title: title.into(), size, conjunction: true }
    }

    pub fn disjunctive(mut self) -> Self {
        self.conjunction = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryConfig {
    pub sortings: BTreeMap<String, SortConfig>,
    pub searchable_fields: Vec<String>,
    /// Facets in display order.
    pub aggregations: Vec<AggregationConfig>,
}

impl QueryConfig {
    /// The fixed configuration of the library catalog.
    pub fn library() -> Self {
        Self {
            sortings: library_sortings(),
            searchable_fields: vec![
                fields::TITLE.to_string(),
                fields::ID.to_string(),
                fields::AUTHORS.to_string(),
                fields::YEAR.to_string(),
                fields::JOURNAL_OR_PUBLISHER.to_string(),
                fields::ABSTRACT_DESCRIPTION.to_string(),
            ],
            aggregations: vec![
                AggregationConfig::new(fields::ACCESS_RIGHTS, "Access Rights", 2),
                AggregationConfig::new(fields::HABITAT_TYPE, "Habitat Type", 13),
                AggregationConfig::new(fields::CATEGORY, "Publication Type", 6),
                AggregationConfig::new(fields::JOURNAL_OR_PUBLISHER, "Journal or Publisher", 45),
                AggregationConfig::new(fields::YEAR, "Year of Publication", 25),
            ],
        }
    }

    pub fn aggregation(&self, field: &str) -> Option<&AggregationConfig> {
        self.aggregations.iter().find(|a| a.field == field)
    }

    pub fn facet_title(&self, field: &str) -> Option<&str> {
        self.aggregation(field).map(|a| a.title.as_str())
    }

    pub fn sorting(&self, name: &str) -> Option<&SortConfig> {
        self.sortings.get(name)
    }
}

/// `name_asc` and `year_name_asc`, shared by the fixed configuration and the
/// one derived from a catalog export.
pub fn library_sortings() -> BTreeMap<String, SortConfig> {
    BTreeMap::from([
        (NAME_SORT.to_string(), SortConfig { keys: vec![SortKey::asc(fields::TITLE)] }),
        (
            DEFAULT_SORT.to_string(),
            SortConfig { keys: vec![SortKey::desc(fields::YEAR).numeric(), SortKey::asc(fields::TITLE)] },
        ),
    ])
}
