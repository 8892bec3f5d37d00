//! Core data models for log statistics
//!
//! Log records themselves stay opaque JSON owned by the store. These types
//! describe what we ask of the store and what we report back.

use std::str::FromStr;

/// An opaque log document as returned by the store
pub type Record = serde_json::Value;

/// Request path that marks a status-check request
pub const STATUS_PATH: &str = "/status";

/// HTTP methods reported by the stats command, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// All methods in the fixed report order
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    /// Exact, case-sensitive match (the store filters on exact values too)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown HTTP method '{}'", s))
    }
}

/// Equality filter on the `method` and `path` fields
///
/// The default (empty) filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub method: Option<Method>,
    pub path: Option<String>,
}

impl LogFilter {
    /// Matches every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn method(method: Method) -> Self {
        Self {
            method: Some(method),
            path: None,
        }
    }

    /// GET requests to the status endpoint
    pub fn status_check() -> Self {
        Self {
            method: Some(Method::Get),
            path: Some(STATUS_PATH.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.method.is_none() && self.path.is_none()
    }

    /// Evaluate the filter against a record held in memory
    pub fn matches(&self, record: &Record) -> bool {
        let field_is = |name: &str, expected: &str| {
            record.get(name).and_then(|v| v.as_str()) == Some(expected)
        };

        if let Some(method) = self.method {
            if !field_is("method", method.as_str()) {
                return false;
            }
        }
        if let Some(path) = &self.path {
            if !field_is("path", path) {
                return false;
            }
        }
        true
    }
}

/// Result of one stats run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStats {
    /// Total number of documents in the collection
    pub total: u64,
    /// Count per method, always all of `Method::ALL` in order
    pub methods: Vec<(Method, u64)>,
    /// GET requests to `/status`
    pub status_checks: u64,
}

impl LogStats {
    pub fn method_count(&self, method: Method) -> u64 {
        self.methods
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_order_and_names() {
        let names: Vec<&str> = Method::ALL.iter().map(|m| m.as_str()).collect();
        assert_eq!(names, vec!["GET", "POST", "PUT", "PATCH", "DELETE"]);
    }

    #[test]
    fn test_method_parse_is_case_sensitive() {
        assert_eq!("PATCH".parse::<Method>(), Ok(Method::Patch));
        assert!("get".parse::<Method>().is_err());
        assert!("HEAD".parse::<Method>().is_err());
    }

    #[test]
    fn test_empty_filter_matches_anything() {
        let filter = LogFilter::all();
        assert!(filter.is_empty());
        assert!(filter.matches(&json!({})));
        assert!(filter.matches(&json!({"method": "HEAD"})));
    }

    #[test]
    fn test_status_check_filter() {
        let filter = LogFilter::status_check();
        assert!(filter.matches(&json!({"method": "GET", "path": "/status"})));
        assert!(!filter.matches(&json!({"method": "POST", "path": "/status"})));
        assert!(!filter.matches(&json!({"method": "GET", "path": "/status/"})));
        assert!(!filter.matches(&json!({"method": "GET"})));
    }

    #[test]
    fn test_filter_ignores_non_string_fields() {
        let filter = LogFilter::method(Method::Get);
        assert!(!filter.matches(&json!({"method": 1})));
        assert!(!filter.matches(&json!(["GET"])));
    }

    #[test]
    fn test_method_count_lookup() {
        let stats = LogStats {
            total: 3,
            methods: vec![(Method::Get, 2), (Method::Post, 1)],
            status_checks: 0,
        };
        assert_eq!(stats.method_count(Method::Get), 2);
        assert_eq!(stats.method_count(Method::Delete), 0);
    }
}
