//! JSON reporter
//!
//! `{"logs": N, "methods": {"GET": N, ...}, "status_check": N}`

use crate::models::LogStats;
use anyhow::Result;
use serde_json::{Map, Value};

/// Render stats as pretty-printed JSON
pub fn render(stats: &LogStats) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_value(stats))?)
}

fn to_value(stats: &LogStats) -> Value {
    let mut methods = Map::new();
    for (method, count) in &stats.methods {
        methods.insert(method.to_string(), Value::from(*count));
    }

    let mut root = Map::new();
    root.insert("logs".to_string(), Value::from(stats.total));
    root.insert("methods".to_string(), Value::Object(methods));
    root.insert("status_check".to_string(), Value::from(stats.status_checks));
    Value::Object(root)
}
