//! Stats command - count documents per method and status checks

use crate::config::StoreConfig;
use crate::reporters;
use crate::stats::{self, CountStrategy};
use crate::store;
use anyhow::{Context, Result};

/// Run the stats command
pub fn run(config: &StoreConfig, grouped: bool, format: &str) -> Result<()> {
    let store = store::open(config)
        .with_context(|| format!("Failed to open store {}", config.uri))?;

    let strategy = if grouped {
        CountStrategy::Grouped
    } else {
        CountStrategy::PerMethod
    };

    let stats = stats::collect(store.as_ref(), strategy)
        .with_context(|| format!("Failed to query {}", store.describe()))?;

    let output = reporters::report(&stats, format)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
