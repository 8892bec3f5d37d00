//! Embedded single-file log collection backed by redb
//!
//! Each collection is one table named `<database>.<collection>` mapping a
//! sequence number to the document's JSON bytes. Several collections can
//! share one file.

use super::{Cursor, FindAll, LogStore, StoreError, StoreResult};
use crate::models::{LogFilter, Record};
use redb::{ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};

fn redb_err<E: Into<redb::Error>>(e: E) -> StoreError {
    StoreError::Redb(e.into())
}

pub struct RedbStore {
    db: redb::Database,
    path: PathBuf,
    table_name: String,
}

impl RedbStore {
    /// Create or open the store file at `path`
    pub fn open(path: impl AsRef<Path>, database: &str, collection: &str) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let db = redb::Database::create(&path).map_err(redb_err)?;
        tracing::debug!("Opened redb store at {}", path.display());

        Ok(Self {
            db,
            path,
            table_name: format!("{}.{}", database, collection),
        })
    }

    fn table(&self) -> TableDefinition<'_, u64, &'static [u8]> {
        TableDefinition::new(&self.table_name)
    }

    /// Raw JSON bytes of every document, in insertion order
    fn raw_documents(&self) -> StoreResult<Vec<Vec<u8>>> {
        let read_txn = self.db.begin_read().map_err(redb_err)?;

        // A missing table is an empty collection
        let table = match read_txn.open_table(self.table()) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(redb_err(e)),
        };

        let mut docs = Vec::new();
        for item in table.iter().map_err(redb_err)? {
            let (_, value) = item.map_err(redb_err)?;
            docs.push(value.value().to_vec());
        }
        Ok(docs)
    }
}

impl FindAll for RedbStore {
    fn find_all(&self) -> StoreResult<Cursor<'_>> {
        let docs = self.raw_documents()?;
        Ok(Box::new(
            docs.into_iter()
                .map(|bytes| serde_json::from_slice::<Record>(&bytes).map_err(StoreError::from)),
        ))
    }
}

impl LogStore for RedbStore {
    fn describe(&self) -> String {
        format!("redb://{} {}", self.path.display(), self.table_name)
    }

    fn count(&self, filter: &LogFilter) -> StoreResult<u64> {
        if filter.is_empty() {
            return Ok(self.raw_documents()?.len() as u64);
        }

        let mut n = 0;
        for record in self.find_all()? {
            if filter.matches(&record?) {
                n += 1;
            }
        }
        Ok(n)
    }

    fn insert_many(&self, records: Vec<Record>) -> StoreResult<usize> {
        let write_txn = self.db.begin_write().map_err(redb_err)?;
        let written = {
            let mut table = write_txn.open_table(self.table()).map_err(redb_err)?;

            let mut next_id = table
                .last()
                .map_err(redb_err)?
                .map(|(k, _)| k.value() + 1)
                .unwrap_or(0);

            for record in &records {
                let value = serde_json::to_vec(record)?;
                table
                    .insert(next_id, value.as_slice())
                    .map_err(redb_err)?;
                next_id += 1;
            }
            records.len()
        };
        write_txn.commit().map_err(redb_err)?;

        tracing::info!("Inserted {} documents into {}", written, self.table_name);
        Ok(written)
    }
}
