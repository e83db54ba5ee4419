//! Faceted filtering and search over the library catalog.
//!
//! [`LibraryFilter`] keeps a document collection, an index built over it by a
//! [`SearchBackend`] and the filters the user has selected. The [`catalog`]
//! module reads the prepared catalog and turns the spreadsheet export into it.

#[cfg(target_arch = "wasm32")]
compile_error!(
    "library_index builds its index with Tantivy's indexing threads, which wasm32 cannot spawn; build the frontend with the `desktop` feature"
);

pub mod backend;
pub mod catalog;
pub mod error;
pub mod library_filter;

pub use backend::{SearchBackend, TantivyBackend, TantivyIndex};
pub use error::{Error, Result};
pub use library_filter::LibraryFilter;
