//! MongoDB log collection (synchronous driver)

use super::{Cursor, FindAll, LogStore, StoreError, StoreResult};
use crate::models::{LogFilter, Record};
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::sync::{Client, Collection};
use std::collections::BTreeMap;

pub struct MongoStore {
    uri: String,
    namespace: String,
    client: Client,
    collection: Collection<Document>,
}

impl MongoStore {
    /// Build a client for `uri` and select `database.collection`
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first query rather than here.
    pub fn connect(uri: &str, database: &str, collection: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri)?;
        let collection = client.database(database).collection::<Document>(collection);
        let namespace = format!("{}.{}", database, collection.name());
        tracing::debug!("MongoDB client ready for {}", namespace);

        Ok(Self {
            uri: uri.to_string(),
            namespace,
            client,
            collection,
        })
    }
}

/// Translate a filter into a MongoDB query document
pub(crate) fn filter_document(filter: &LogFilter) -> Document {
    let mut query = Document::new();
    if let Some(method) = filter.method {
        query.insert("method", method.as_str());
    }
    if let Some(path) = &filter.path {
        query.insert("path", path.as_str());
    }
    query
}

fn to_record(document: Document) -> Record {
    Bson::Document(document).into_relaxed_extjson()
}

impl FindAll for MongoStore {
    fn find_all(&self) -> StoreResult<Cursor<'_>> {
        let cursor = self.collection.find(None, None)?;
        Ok(Box::new(cursor.map(|doc| {
            doc.map(to_record).map_err(StoreError::from)
        })))
    }
}

impl LogStore for MongoStore {
    fn describe(&self) -> String {
        format!("{} {}", self.uri, self.namespace)
    }

    fn count(&self, filter: &LogFilter) -> StoreResult<u64> {
        let query = filter_document(filter);
        tracing::debug!("count_documents({})", query);
        Ok(self.collection.count_documents(query, None)?)
    }

    fn insert_many(&self, records: Vec<Record>) -> StoreResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut docs = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let doc = bson::to_document(record).map_err(|e| StoreError::InvalidRecord {
                line: i + 1,
                reason: e.to_string(),
            })?;
            docs.push(doc);
        }

        let result = self.collection.insert_many(docs, None)?;
        Ok(result.inserted_ids.len())
    }

    fn ping(&self) -> StoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)?;
        Ok(())
    }

    /// One `$group` aggregation instead of a count per method
    fn count_by_method(&self) -> StoreResult<BTreeMap<String, u64>> {
        let pipeline = vec![doc! {
            "$group": { "_id": "$method", "count": { "$sum": 1 } }
        }];

        let groups = self
            .collection
            .aggregate(pipeline, None)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(groups_from_documents(groups))
    }
}

/// Decode `{ _id: <method>, count: <n> }` groups into counts keyed by method
///
/// Groups whose `_id` is not a string (records without a method) are skipped.
pub(crate) fn groups_from_documents(
    groups: impl IntoIterator<Item = Document>,
) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for group in groups {
        let Ok(method) = group.get_str("_id") else {
            continue;
        };
        let count = match group.get("count") {
            Some(Bson::Int32(n)) => (*n).max(0) as u64,
            Some(Bson::Int64(n)) => (*n).max(0) as u64,
            Some(Bson::Double(n)) => *n as u64,
            _ => 0,
        };
        counts.insert(method.to_string(), count);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Method;
    use crate::store::method_counts_from_groups;

    #[test]
    fn test_empty_filter_is_empty_document() {
        assert!(filter_document(&LogFilter::all()).is_empty());
    }

    #[test]
    fn test_status_check_filter_document() {
        let query = filter_document(&LogFilter::status_check());
        assert_eq!(query, doc! { "method": "GET", "path": "/status" });
    }

    #[test]
    fn test_method_filter_document() {
        let query = filter_document(&LogFilter::method(Method::Delete));
        assert_eq!(query, doc! { "method": "DELETE" });
    }

    #[test]
    fn test_to_record_is_plain_json() {
        let record = to_record(doc! { "method": "GET", "status": 200_i32 });
        assert_eq!(record["method"], "GET");
        assert_eq!(record["status"], 200);
    }

    #[test]
    fn test_groups_decode_int32_and_int64_counts() {
        let counts = groups_from_documents(vec![
            doc! { "_id": "GET", "count": 3_i32 },
            doc! { "_id": "POST", "count": 2_i64 },
        ]);
        assert_eq!(counts.get("GET"), Some(&3));
        assert_eq!(counts.get("POST"), Some(&2));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_groups_skip_null_method() {
        let counts = groups_from_documents(vec![
            doc! { "_id": Bson::Null, "count": 4_i32 },
            doc! { "_id": 7_i32, "count": 1_i32 },
            doc! { "_id": "GET", "count": 1_i32 },
        ]);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("GET"), Some(&1));
    }

    #[test]
    fn test_groups_keep_unlisted_methods_out_of_report() {
        let counts = groups_from_documents(vec![
            doc! { "_id": "HEAD", "count": 5_i32 },
            doc! { "_id": "DELETE", "count": 1.0_f64 },
            doc! { "_id": "PUT", "count": "many" },
        ]);
        assert_eq!(counts.get("HEAD"), Some(&5));
        assert_eq!(counts.get("PUT"), Some(&0));

        let methods = method_counts_from_groups(&counts);
        let reported: Vec<Method> = methods.iter().map(|(m, _)| *m).collect();
        assert_eq!(reported, Method::ALL.to_vec());
        assert_eq!(
            methods,
            vec![
                (Method::Get, 0),
                (Method::Post, 0),
                (Method::Put, 0),
                (Method::Patch, 0),
                (Method::Delete, 1),
            ]
        );
    }

    #[test]
    fn test_connect_does_not_need_a_server() {
        let store = MongoStore::connect("mongodb://localhost:27017/", "logs", "nginx").unwrap();
        assert_eq!(store.describe(), "mongodb://localhost:27017/ logs.nginx");
    }

    #[test]
    fn test_bad_uri_is_an_error() {
        assert!(matches!(
            MongoStore::connect("mongodb://", "logs", "nginx"),
            Err(StoreError::Mongo(_))
        ));
    }
}
