//! List command - print every document as one JSON line

use crate::config::StoreConfig;
use crate::lister;
use crate::store;
use anyhow::{Context, Result};
use std::io::Write;

pub fn run(config: &StoreConfig, limit: Option<usize>) -> Result<()> {
    let store = store::open(config)
        .with_context(|| format!("Failed to open store {}", config.uri))?;

    let documents = lister::list_all(store.as_ref())
        .with_context(|| format!("Failed to list {}", store.describe()))?;
    tracing::info!("{} documents in {}", documents.len(), store.describe());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for doc in documents.iter().take(limit.unwrap_or(usize::MAX)) {
        writeln!(out, "{}", serde_json::to_string(doc)?)?;
    }
    out.flush()?;
    Ok(())
}
