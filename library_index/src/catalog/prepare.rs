//! Turns the library spreadsheet export into the catalog and its query
//! configuration.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::Read;

use common::document::{Document, FieldValue};
use common::query_config::{AggregationConfig, QueryConfig, library_sortings};
use tracing::{debug, info, warn};

use super::collect::normalized_file_name;
use super::config::LibraryConfig;
use crate::error::Result;

/// One spreadsheet row, cells trimmed.
pub type Record = BTreeMap<String, String>;

/// Reads CSV rows keyed by header, trimming every cell.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: Record = row?;
        records.push(record);
    }
    Ok(records)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    InvalidAccess(String),
    MissingFile(String),
    MissingPublishedUrl,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::InvalidAccess(value) => write!(f, "invalid access value, {value}"),
            DropReason::MissingFile(file) => write!(f, "open access document file is missing, {file}"),
            DropReason::MissingPublishedUrl => write!(f, "publisher access document has no URL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub id: String,
    pub reason: DropReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedLibrary {
    pub documents: Vec<Document>,
    pub query_config: QueryConfig,
    /// Rows with a problem; rows that are simply not active are not listed.
    pub dropped: Vec<DroppedRow>,
    pub inactive: usize,
}

/// Runs every preparation step over the spreadsheet rows.
///
/// `available_files` names the files present in the documents directory.
pub fn prepare_library(records: Vec<Record>, config: &LibraryConfig, available_files: &BTreeSet<String>) -> PreparedLibrary {
    let total = records.len();
    let (records, inactive) = keep_active(records, config);

    let mut dropped = Vec::new();
    let mut documents = Vec::with_capacity(records.len());
    for mut record in records {
        if let Err(reason) = set_display_link(&mut record, config, available_files) {
            let id = cell(&record, &config.columns.id).to_string();
            warn!("ID {id} | {reason}");
            dropped.push(DroppedRow { id, reason });
            continue;
        }
        for column in &config.fields.private {
            record.remove(column);
        }
        documents.push(to_document(record, config));
    }

    let query_config = derive_query_config(&documents, config);
    info!(
        "Prepared {} of {} rows: {} not active, {} dropped",
        documents.len(),
        total,
        inactive,
        dropped.len()
    );
    PreparedLibrary { documents, query_config, dropped, inactive }
}

fn cell<'a>(record: &'a Record, column: &str) -> &'a str {
    record.get(column).map(String::as_str).unwrap_or_default()
}

/// Keeps only active rows, unless the export has no status column at all.
fn keep_active(records: Vec<Record>, config: &LibraryConfig) -> (Vec<Record>, usize) {
    let status = &config.columns.status;
    if !records.iter().any(|r| r.contains_key(status)) {
        return (records, 0);
    }
    let before = records.len();
    let active = records
        .into_iter()
        .filter(|r| cell(r, status) == config.status.active)
        .collect::<Vec<_>>();
    info!("Extracted only the {} records to process", config.status.active);
    let inactive = before - active.len();
    (active, inactive)
}

fn set_display_link(record: &mut Record, config: &LibraryConfig, available_files: &BTreeSet<String>) -> std::result::Result<(), DropReason> {
    let access = cell(record, &config.columns.access).to_string();
    let (url, icon) = if access == config.access.physical_library {
        (config.urls.physical_library.clone(), config.icons.library.clone())
    } else if access == config.access.open {
        let file = cell(record, &config.columns.filename);
        let stored = normalized_file_name(file);
        if file.is_empty() || !available_files.contains(&stored) {
            return Err(DropReason::MissingFile(file.to_string()));
        }
        (format!("{}{}", config.urls.download, stored), config.icons.download.clone())
    } else if access == config.access.publisher {
        let url = cell(record, &config.columns.published_url);
        if url.is_empty() {
            return Err(DropReason::MissingPublishedUrl);
        }
        (url.to_string(), config.icons.webpage.clone())
    } else {
        return Err(DropReason::InvalidAccess(access));
    };
    record.insert(config.columns.display_url.clone(), url);
    record.insert(config.columns.display_icon.clone(), icon);
    Ok(())
}

/// Facet id of a filter column: anything but ASCII letters and digits
/// becomes `_`, so ids stay usable as field and url keys.
pub fn facet_id(column: &str) -> String {
    column.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect()
}

/// Empty cells become missing fields. A filter column whose facet id differs
/// from its header is stored under both.
fn to_document(record: Record, config: &LibraryConfig) -> Document {
    let mut document = Document::new();
    for (column, value) in record {
        if value.is_empty() {
            continue;
        }
        let value = if config.is_multi_option(&column) {
            FieldValue::List(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|option| !option.is_empty())
                    .map(str::to_string)
                    .collect(),
            )
        } else if config.is_integer(&column) {
            match value.parse::<i64>() {
                Ok(number) => FieldValue::Int(number),
                Err(_) => {
                    debug!("{column} value {value} is not an integer, kept as text");
                    FieldValue::Text(value)
                }
            }
        } else {
            FieldValue::Text(value)
        };
        let id = facet_id(&column);
        if id != column && config.fields.filters.contains(&column) {
            document.insert(id, value.clone());
        }
        document.insert(column, value);
    }
    document
}

/// Sortings are fixed; each filter column becomes a facet, keyed by its
/// facet id, listing every distinct value it has in the catalog.
pub fn derive_query_config(documents: &[Document], config: &LibraryConfig) -> QueryConfig {
    let aggregations = config
        .fields
        .filters
        .iter()
        .map(|column| {
            let distinct = documents
                .iter()
                .filter_map(|d| d.get(column))
                .flat_map(|v| v.facet_keys())
                .collect::<BTreeSet<_>>();
            debug!("Facet {column} has {} options", distinct.len());
            AggregationConfig::new(facet_id(column), config.facet_title(column), distinct.len())
        })
        .collect();

    QueryConfig {
        sortings: library_sortings(),
        searchable_fields: config.fields.searchable.clone(),
        aggregations,
    }
}
