//! Copies the files of open access documents from the source tree into the
//! documents directory the catalog links to.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{info, warn};
use walkdir::WalkDir;

use super::config::LibraryConfig;
use super::prepare::Record;
use crate::error::{Error, Result};

/// What a collection run did, or would do on a dry run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectSummary {
    pub copied: usize,
    pub empty_filenames: usize,
    pub missing: usize,
    pub already_present: usize,
}

/// Name a file is stored under in the documents directory.
pub fn normalized_file_name(name: &str) -> String {
    name.replace([' ', '/'], "_")
}

/// Files under `src` whose path relative to `src` matches `pattern`, keyed
/// by file name. A later file with the same name replaces an earlier one.
pub fn source_files(src: &Path, pattern: &str) -> Result<BTreeMap<String, PathBuf>> {
    let pattern = Pattern::new(pattern).map_err(|err| Error::config(format!("file pattern {pattern}: {err}")))?;
    let options = MatchOptions { require_literal_separator: true, ..MatchOptions::new() };

    let mut files = BTreeMap::new();
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|err| Error::config(format!("walking {}: {err}", src.display())))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        if pattern.matches_path_with(relative, options) {
            files.insert(entry.file_name().to_string_lossy().into_owned(), entry.path().to_path_buf());
        }
    }
    Ok(files)
}

fn wants_file(record: &Record, config: &LibraryConfig) -> bool {
    let value = |column: &str| record.get(column).map(String::as_str).unwrap_or_default();
    let active = &config.status.active;
    value(&config.columns.access).eq_ignore_ascii_case(&config.access.open)
        && (active.is_empty() || value(&config.columns.status).eq_ignore_ascii_case(active))
}

/// Copies the file of every active open access row that is not yet in the
/// documents directory. The first failed copy stops the run.
pub fn collect_open_access_files(records: &[Record], config: &LibraryConfig, dry_run: bool) -> Result<CollectSummary> {
    let paths = &config.paths;
    info!("Copying files from {}", paths.src_path.display());
    info!("Copying files to {}", paths.docs_dir.display());

    let sources = source_files(&paths.src_path, &paths.file_pattern)?;
    let present = super::list_files(&paths.docs_dir)?;
    info!("#files in {} is {}", paths.src_path.display(), sources.len());

    let mut summary = CollectSummary::default();
    for record in records.iter().filter(|r| wants_file(r, config)) {
        let id = record.get(&config.columns.id).map(String::as_str).unwrap_or_default();
        let filename = record.get(&config.columns.filename).map(String::as_str).unwrap_or_default();
        if filename.is_empty() {
            warn!("ID {id} | {} is {} | {} field is empty", config.columns.access, config.access.open, config.columns.filename);
            summary.empty_filenames += 1;
            continue;
        }
        let Some(source) = sources.get(filename) else {
            warn!("ID {id} | File {filename} listed in spreadsheet but not found in {}", paths.src_path.display());
            summary.missing += 1;
            continue;
        };

        let target_name = normalized_file_name(filename);
        if present.contains(&target_name) {
            info!("ID {id} | file already exists at destination");
            summary.already_present += 1;
            continue;
        }
        let target = paths.docs_dir.join(&target_name);
        if !dry_run {
            fs::copy(source, &target)
                .map_err(|err| Error::config(format!("ID {id} | copy of {} failed: {err}", source.display())))?;
        }
        info!("Copied {} to {}.", source.display(), target.display());
        summary.copied += 1;
    }

    info!(
        "Files copied {} | Files with empty filename {} | File already in dest {} | Missing files {}",
        summary.copied, summary.empty_filenames, summary.already_present, summary.missing
    );
    Ok(summary)
}

/// Names of the files directly inside `dir`.
pub(crate) fn file_names(dir: &Path) -> Result<BTreeSet<String>> {
    let mut files = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(files)
}
