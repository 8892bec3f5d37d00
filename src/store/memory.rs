//! In-memory log collection (no persistence)

use super::{Cursor, FindAll, LogStore, StoreResult};
use crate::models::{LogFilter, Record};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Log collection held in a `Vec`
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A poisoned lock still holds consistent data: writers only push.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Record>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Record>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl FindAll for MemoryStore {
    fn find_all(&self) -> StoreResult<Cursor<'_>> {
        // Snapshot so the cursor does not hold the lock
        let snapshot = self.read().clone();
        Ok(Box::new(snapshot.into_iter().map(Ok)))
    }
}

impl LogStore for MemoryStore {
    fn describe(&self) -> String {
        format!("memory ({} documents)", self.len())
    }

    fn count(&self, filter: &LogFilter) -> StoreResult<u64> {
        Ok(self.read().iter().filter(|r| filter.matches(r)).count() as u64)
    }

    fn insert_many(&self, records: Vec<Record>) -> StoreResult<usize> {
        let n = records.len();
        self.write().extend(records);
        Ok(n)
    }
}
