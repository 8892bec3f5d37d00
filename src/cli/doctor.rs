//! Doctor command - check config and store connectivity

use crate::config::{StoreConfig, UserConfig};
use crate::store;
use anyhow::Result;
use console::style;

pub fn run(config: &StoreConfig) -> Result<()> {
    println!("\nlog-stats doctor\n");

    match UserConfig::user_config_path() {
        Some(path) if path.exists() => {
            println!("  {} Config: {}", style("[OK]").green(), style(path.display()).cyan())
        }
        Some(path) => println!(
            "  {} Config: {} (not created, using defaults)",
            style("[--]").dim(),
            style(path.display()).dim()
        ),
        None => println!("  {} Config: no config directory", style("[--]").dim()),
    }

    println!("  Store: {}", style(&config.uri).cyan());
    println!("  Collection: {}.{}", config.database, config.collection);
    println!();

    let result = store::open(config).and_then(|s| s.ping().map(|_| s));
    match result {
        Ok(store) => {
            println!("  {} {} answers", style("[OK]").green(), store.describe());
            println!();
            Ok(())
        }
        Err(e) => {
            println!("  {} {}", style("[FAIL]").red(), e);
            println!();
            anyhow::bail!("Store check failed")
        }
    }
}
