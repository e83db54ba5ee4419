//! Ordering of matched documents by a configured sorting.

use std::cmp::Ordering;

use common::document::Document;
use common::query_config::{SortKey, SortKind, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Int(i64),
    Text(String),
}

fn sort_value(document: &Document, key: &SortKey) -> Option<SortValue> {
    let value = document.get(&key.field)?;
    match key.kind {
        SortKind::Numeric => value.as_int().map(SortValue::Int),
        SortKind::Text => Some(SortValue::Text(value.to_text())),
    }
}

/// Compares two documents key by key. Missing values go last whatever the
/// direction; a numeric key without an integer value counts as missing.
pub(crate) fn compare_documents(a: &Document, b: &Document, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ord = match (sort_value(a, key), sort_value(b, key)) {
            (Some(x), Some(y)) => match key.order {
                SortOrder::Asc => x.cmp(&y),
                SortOrder::Desc => y.cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
