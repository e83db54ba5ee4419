//! Error types for the library index.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("search index error: {0}")]
    Index(#[from] tantivy::TantivyError),

    #[error("unknown facet: {0}")]
    UnknownFacet(String),

    #[error("unknown sort: {0}")]
    UnknownSort(String),

    #[error("invalid query configuration: {0}")]
    Config(String),

    #[error("no documents have been loaded")]
    NotLoaded,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
