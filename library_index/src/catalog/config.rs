//! Configuration of the catalog preparation tool, read from
//! `library-config.toml`.
//!
//! Every section has defaults matching the library spreadsheet, so a config
//! file only needs to name what differs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub paths: PathsConfig,
    pub columns: ColumnLabels,
    pub access: AccessValues,
    pub status: StatusValues,
    pub icons: Icons,
    pub urls: Urls,
    pub fields: FieldsConfig,
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// The spreadsheet export.
    pub library_index_csv: PathBuf,
    pub library_index_json: PathBuf,
    pub query_config_json: PathBuf,
    /// Directory holding the files of open access documents.
    pub docs_dir: PathBuf,
    /// Tree the open access files are copied from.
    pub src_path: PathBuf,
    /// Glob, relative to `src_path`, selecting the files to copy.
    pub file_pattern: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            library_index_csv: PathBuf::from("data/library-index.csv"),
            library_index_json: PathBuf::from("assets/library-index.json"),
            query_config_json: PathBuf::from("assets/query-config.json"),
            docs_dir: PathBuf::from("assets/data"),
            src_path: PathBuf::from("data/source-docs"),
            file_pattern: "**/*.pdf".to_string(),
        }
    }
}

/// Spreadsheet columns the tool reads or writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLabels {
    pub id: String,
    pub access: String,
    pub filename: String,
    pub published_url: String,
    pub status: String,
    pub display_url: String,
    pub display_icon: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            id: "ID".to_string(),
            access: "Access_Rights".to_string(),
            filename: "File_name".to_string(),
            published_url: "URL".to_string(),
            status: "Status".to_string(),
            display_url: "URL".to_string(),
            display_icon: "icon".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessValues {
    pub open: String,
    pub physical_library: String,
    pub publisher: String,
}

impl Default for AccessValues {
    fn default() -> Self {
        Self {
            open: "Free to download".to_string(),
            physical_library: "Request from JCU library".to_string(),
            publisher: "Download from publisher".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusValues {
    pub active: String,
    pub deleted: String,
}

impl Default for StatusValues {
    fn default() -> Self {
        Self { active: "Active".to_string(), deleted: "Deleted".to_string() }
    }
}

/// Material icon names shown next to each document link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Icons {
    pub webpage: String,
    pub download: String,
    pub support: String,
    pub library: String,
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            webpage: "open_in_new".to_string(),
            download: "file_download".to_string(),
            support: "contact_support".to_string(),
            library: "local_library".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Urls {
    pub physical_library: String,
    pub contact_us: String,
    /// Prefix of the download link of an open access file.
    pub download: String,
}

impl Default for Urls {
    fn default() -> Self {
        Self {
            physical_library: "https://www.jcu.edu.au/library".to_string(),
            contact_us: "/contact-us".to_string(),
            download: "/statics/data/".to_string(),
        }
    }
}

/// Which columns are searched, filtered, hidden, split or parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    pub searchable: Vec<String>,
    /// Facet columns, in panel order.
    pub filters: Vec<String>,
    /// Columns removed before the catalog is written.
    pub private: Vec<String>,
    /// Columns holding comma separated options.
    pub multi_option: Vec<String>,
    pub integer: Vec<String>,
    /// Facet titles by column; a column without one is titled by its name.
    pub titles: BTreeMap<String, String>,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            searchable: strings(&["Title", "ID", "Authors", "Year", "JournalOrPublisher", "Abstract_Description"]),
            filters: strings(&["Access_Rights", "Habitat_type", "Category", "JournalOrPublisher", "Year"]),
            private: strings(&["File_name", "Status", "Notes"]),
            multi_option: strings(&["Catchment", "State", "Habitat_type", "Region"]),
            integer: strings(&["Year"]),
            titles: BTreeMap::from([
                ("Access_Rights".to_string(), "Access Rights".to_string()),
                ("Habitat_type".to_string(), "Habitat Type".to_string()),
                ("Category".to_string(), "Publication Type".to_string()),
                ("JournalOrPublisher".to_string(), "Journal or Publisher".to_string()),
                ("Year".to_string(), "Year of Publication".to_string()),
            ]),
        }
    }
}

impl LibraryConfig {
    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Loads the config file; relative paths inside it are resolved against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| Error::config(format!("read config {}: {err}", path.display())))?;
        let mut config = Self::from_toml(&raw)?;
        if let Some(base) = path.parent() {
            config.paths.resolve_against(base);
        }
        Ok(config)
    }

    pub fn facet_title<'a>(&'a self, column: &'a str) -> &'a str {
        self.fields.titles.get(column).map(String::as_str).unwrap_or(column)
    }

    pub fn is_multi_option(&self, column: &str) -> bool {
        self.fields.multi_option.iter().any(|c| c == column)
    }

    pub fn is_integer(&self, column: &str) -> bool {
        self.fields.integer.iter().any(|c| c == column)
    }
}

impl PathsConfig {
    fn resolve_against(&mut self, base: &Path) {
        for path in [
            &mut self.library_index_csv,
            &mut self.library_index_json,
            &mut self.query_config_json,
            &mut self.docs_dir,
            &mut self.src_path,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
