//! Log statistics collection
//!
//! Issues the count queries against a [`LogStore`] and assembles a
//! [`LogStats`]. Rendering lives in `reporters`.

use crate::models::{LogFilter, LogStats, Method};
use crate::store::{method_counts_from_groups, LogStore, StoreResult};
use tracing::debug;

/// How per-method counts are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountStrategy {
    /// One filtered count query per method
    #[default]
    PerMethod,
    /// One grouped aggregation for all methods
    Grouped,
}

/// Run the stats queries: total, per method, status checks
///
/// Store errors propagate unchanged.
pub fn collect(store: &dyn LogStore, strategy: CountStrategy) -> StoreResult<LogStats> {
    let total = store.count(&LogFilter::all())?;
    debug!("{} documents in {}", total, store.describe());

    let methods = match strategy {
        CountStrategy::PerMethod => Method::ALL
            .iter()
            .map(|m| Ok((*m, store.count(&LogFilter::method(*m))?)))
            .collect::<StoreResult<Vec<_>>>()?,
        CountStrategy::Grouped => method_counts_from_groups(&store.count_by_method()?),
    };

    let status_checks = store.count(&LogFilter::status_check())?;

    Ok(LogStats {
        total,
        methods,
        status_checks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use crate::store::{Cursor, FindAll, MemoryStore};
    use serde_json::json;
    use std::cell::RefCell;

    fn fixture() -> MemoryStore {
        MemoryStore::with_records(vec![
            json!({"method": "GET", "path": "/"}),
            json!({"method": "GET", "path": "/index.html"}),
            json!({"method": "GET", "path": "/status"}),
            json!({"method": "POST", "path": "/login"}),
            json!({"method": "POST", "path": "/status"}),
            json!({"method": "HEAD", "path": "/"}),
        ])
    }

    #[test]
    fn test_collect_per_method() {
        let stats = collect(&fixture(), CountStrategy::PerMethod).unwrap();
        assert_eq!(stats.total, 6);
        assert_eq!(
            stats.methods,
            vec![
                (Method::Get, 3),
                (Method::Post, 2),
                (Method::Put, 0),
                (Method::Patch, 0),
                (Method::Delete, 0),
            ]
        );
        assert_eq!(stats.status_checks, 1);
    }

    #[test]
    fn test_grouped_matches_per_method() {
        let store = fixture();
        assert_eq!(
            collect(&store, CountStrategy::Grouped).unwrap(),
            collect(&store, CountStrategy::PerMethod).unwrap()
        );
    }

    #[test]
    fn test_collect_empty_collection() {
        let stats = collect(&MemoryStore::new(), CountStrategy::default()).unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.status_checks, 0);
        assert_eq!(stats.methods.len(), 5);
        assert!(stats.methods.iter().all(|(_, c)| *c == 0));
    }

    /// Records every count query and fails once told to
    struct ScriptedStore {
        queries: RefCell<Vec<LogFilter>>,
        fail_after: usize,
    }

    impl FindAll for ScriptedStore {
        fn find_all(&self) -> StoreResult<Cursor<'_>> {
            Ok(Box::new(std::iter::empty::<StoreResult<Record>>()))
        }
    }

    impl LogStore for ScriptedStore {
        fn describe(&self) -> String {
            "scripted".to_string()
        }

        fn count(&self, filter: &LogFilter) -> StoreResult<u64> {
            let mut queries = self.queries.borrow_mut();
            if queries.len() >= self.fail_after {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )
                .into());
            }
            queries.push(filter.clone());
            Ok(1)
        }

        fn insert_many(&self, _records: Vec<Record>) -> StoreResult<usize> {
            Ok(0)
        }
    }

    #[test]
    fn test_per_method_issues_seven_queries_in_order() {
        let store = ScriptedStore {
            queries: RefCell::new(Vec::new()),
            fail_after: usize::MAX,
        };
        collect(&store, CountStrategy::PerMethod).unwrap();

        let queries = store.queries.into_inner();
        assert_eq!(queries.len(), 7);
        assert_eq!(queries[0], LogFilter::all());
        for (i, m) in Method::ALL.iter().enumerate() {
            assert_eq!(queries[i + 1], LogFilter::method(*m));
        }
        assert_eq!(queries[6], LogFilter::status_check());
    }

    #[test]
    fn test_store_failure_propagates() {
        let store = ScriptedStore {
            queries: RefCell::new(Vec::new()),
            fail_after: 2,
        };
        let err = collect(&store, CountStrategy::PerMethod).unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
