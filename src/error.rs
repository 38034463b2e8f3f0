use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Input did not match the bookmarks tree shape.
    #[error("malformed bookmarks file: {0}")]
    Format(#[from] serde_json::Error),

    /// Bookmarks file is not where it was expected.
    #[error("bookmarks file not found at {0:?}")]
    NotFound(PathBuf),

    /// Reading the source file or removing an old store failed.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file could not be opened.
    #[error("failed to open store {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create schema: {0}")]
    Schema(#[source] rusqlite::Error),

    /// A read or write against an open store failed.
    #[error("store query failed: {0}")]
    Query(#[from] rusqlite::Error),
}
