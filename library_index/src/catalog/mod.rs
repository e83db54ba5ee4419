//! The prepared library catalog and the tooling that produces it.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use common::document::Document;
use common::query_config::QueryConfig;
use tracing::info;

use crate::error::Result;

pub mod collect;
pub mod config;
pub mod prepare;

pub use collect::{CollectSummary, collect_open_access_files};
pub use config::LibraryConfig;
pub use prepare::{PreparedLibrary, prepare_library, read_records};

/// Names of the files in a documents directory.
pub fn list_files(dir: &Path) -> Result<BTreeSet<String>> {
    let files = collect::file_names(dir)?;
    info!("#files in {} is {}", dir.display(), files.len());
    Ok(files)
}

/// Parses a catalog: a JSON array of document objects.
pub fn parse_documents(json: &str) -> Result<Vec<Document>> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_documents(path: &Path) -> Result<Vec<Document>> {
    let raw = fs::read_to_string(path)?;
    let documents = parse_documents(&raw)?;
    info!("Read {} documents from {}", documents.len(), path.display());
    Ok(documents)
}

pub fn write_documents(path: &Path, documents: &[Document]) -> Result<()> {
    fs::write(path, serde_json::to_string(documents)?)?;
    info!("Wrote {} documents to {}", documents.len(), path.display());
    Ok(())
}

pub fn write_query_config(path: &Path, config: &QueryConfig) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    info!("Wrote query config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_catalog_with_nulls() {
        let json = r#"[
            {"ID": 12, "Title": "Mangrove dieback", "Year": "2018", "URL": null},
            {"ID": "13", "Title": "Seagrass", "Habitat_type": ["Seagrass", "Estuary"]}
        ]"#;
        let docs = parse_documents(json).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].year(), Some(2018));
        assert!(docs[0].url().is_none());
        assert_eq!(docs[1].habitat_types(), vec!["Seagrass", "Estuary"]);
    }

    #[test]
    fn catalog_must_be_an_array() {
        assert!(parse_documents(r#"{"Title": "x"}"#).is_err());
    }

    #[test]
    fn write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library-index.json");
        let docs = vec![Document::new().with("Title", "Lagoon survey").with("Year", 2001)];
        write_documents(&path, &docs).unwrap();
        assert_eq!(read_documents(&path).unwrap(), docs);
    }
}
