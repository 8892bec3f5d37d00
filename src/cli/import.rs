//! Import command - load NDJSON documents into the collection

use crate::config::StoreConfig;
use crate::store;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

pub fn run(config: &StoreConfig, file: &Path) -> Result<()> {
    let input = if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };

    let records = store::parse_ndjson(&input)
        .with_context(|| format!("Invalid input in {}", file.display()))?;

    let store = store::open(config)
        .with_context(|| format!("Failed to open store {}", config.uri))?;
    let written = store
        .insert_many(records)
        .with_context(|| format!("Failed to write to {}", store.describe()))?;

    println!("Imported {} documents into {}", written, store.describe());
    Ok(())
}
