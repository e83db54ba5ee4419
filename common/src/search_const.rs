//! Constants for the default library query.

/// Number of documents returned per result page.
pub const PAGE_SIZE: usize = 100;

/// Sorting used when nothing else was requested.
pub const DEFAULT_SORT: &str = "year_name_asc";

/// Alternate sorting by title only.
pub const NAME_SORT: &str = "name_asc";

/// Search text must match indexed terms exactly.
pub const EXACT_SEARCH: bool = true;
