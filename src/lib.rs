//! Copy Chrome bookmarks into a flat SQLite table.
//!
//! Pipeline:
//!   1. locate the `Bookmarks` file under a profile directory
//!   2. decode the JSON tree (bookmark bar, other, synced)
//!   3. flatten each root depth-first into `{name, url}` records
//!   4. recreate the store and upsert, last record per url wins

pub mod bookmarks;
pub mod db;
pub mod error;
pub mod report;
pub mod settings;

pub use db::{Record, Store};
pub use error::{Error, Result};
