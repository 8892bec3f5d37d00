//! Document store access
//!
//! The stats reporter and the lister only see two capabilities:
//! - [`FindAll`]: enumerate every document of one collection
//! - [`LogStore`]: count documents matching a [`LogFilter`], plus seeding
//!
//! Backends are chosen from the connection URI:
//! - `mongodb://` / `mongodb+srv://` -> [`MongoStore`]
//! - `redb://<path>` -> [`RedbStore`] (single-file embedded store)
//!
//! [`MemoryStore`] is available to library users and tests.

mod memory;
mod mongo;
mod redb_store;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use redb_store::RedbStore;

use crate::config::StoreConfig;
use crate::models::{LogFilter, Method, Record};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by store backends
///
/// Driver errors are wrapped as-is; nothing here retries.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported store URI '{0}'. Expected mongodb://, mongodb+srv:// or redb://<path>")]
    UnsupportedUri(String),

    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Lazy, finite sequence of documents. Ask [`FindAll::find_all`] again to restart.
pub type Cursor<'a> = Box<dyn Iterator<Item = StoreResult<Record>> + 'a>;

/// A collection that can hand out all of its documents
pub trait FindAll {
    fn find_all(&self) -> StoreResult<Cursor<'_>>;
}

/// Common interface for log collections
pub trait LogStore: FindAll {
    /// Human-readable location, e.g. `mongodb://localhost:27017/ logs.nginx`
    fn describe(&self) -> String;

    /// Count documents matching the filter
    fn count(&self, filter: &LogFilter) -> StoreResult<u64>;

    /// Append documents to the collection, returning how many were written
    fn insert_many(&self, records: Vec<Record>) -> StoreResult<usize>;

    /// Round-trip to the store to check it answers
    fn ping(&self) -> StoreResult<()> {
        self.count(&LogFilter::all()).map(|_| ())
    }

    /// Document count grouped by the raw `method` value
    ///
    /// Documents without a string `method` are not included. The default
    /// scans `find_all`; backends with server-side grouping override it.
    fn count_by_method(&self) -> StoreResult<BTreeMap<String, u64>> {
        let mut counts = BTreeMap::new();
        for record in self.find_all()? {
            let record = record?;
            if let Some(method) = record.get("method").and_then(|m| m.as_str()) {
                *counts.entry(method.to_string()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}

impl<T: FindAll + ?Sized> FindAll for Box<T> {
    fn find_all(&self) -> StoreResult<Cursor<'_>> {
        (**self).find_all()
    }
}

impl<T: FindAll + ?Sized> FindAll for &T {
    fn find_all(&self) -> StoreResult<Cursor<'_>> {
        (**self).find_all()
    }
}

/// Open the store named by the config's URI
pub fn open(config: &StoreConfig) -> StoreResult<Box<dyn LogStore>> {
    let uri = config.uri.trim();
    tracing::debug!(
        "Opening store {} ({}.{})",
        uri,
        config.database,
        config.collection
    );

    if uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://") {
        let store = MongoStore::connect(uri, &config.database, &config.collection)?;
        Ok(Box::new(store))
    } else if let Some(path) = uri.strip_prefix("redb://") {
        if path.is_empty() {
            return Err(StoreError::UnsupportedUri(uri.to_string()));
        }
        let store = RedbStore::open(path, &config.database, &config.collection)?;
        Ok(Box::new(store))
    } else {
        Err(StoreError::UnsupportedUri(uri.to_string()))
    }
}

/// Parse newline-delimited JSON into records
///
/// Blank lines are skipped. Every other line must be a JSON object.
pub fn parse_ndjson(input: &str) -> StoreResult<Vec<Record>> {
    let mut records = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Record =
            serde_json::from_str(line).map_err(|e| StoreError::InvalidRecord {
                line: i + 1,
                reason: e.to_string(),
            })?;
        if !value.is_object() {
            return Err(StoreError::InvalidRecord {
                line: i + 1,
                reason: "expected a JSON object".to_string(),
            });
        }
        records.push(value);
    }
    Ok(records)
}

/// Per-method counts from a grouped map, in report order, zero-filled
pub(crate) fn method_counts_from_groups(groups: &BTreeMap<String, u64>) -> Vec<(Method, u64)> {
    Method::ALL
        .iter()
        .map(|m| (*m, groups.get(m.as_str()).copied().unwrap_or(0)))
        .collect()
}
