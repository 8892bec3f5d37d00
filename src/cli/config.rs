//! Config command - create or show the user config

use crate::config::{StoreConfig, StoreSection, UserConfig};
use anyhow::Result;
use console::style;

pub fn init() -> Result<()> {
    let path = UserConfig::init_user_config()?;
    println!("{} Config file: {}", style("✓").green(), style(path.display()).cyan());
    Ok(())
}

/// Print the config path and the settings that would be used, as TOML
pub fn show(config: &StoreConfig) -> Result<()> {
    match UserConfig::user_config_path() {
        Some(path) => println!("# Config file: {}", path.display()),
        None => println!("# Config file: (no config directory)"),
    }

    let resolved = UserConfig {
        store: StoreSection {
            uri: Some(config.uri.clone()),
            database: Some(config.database.clone()),
            collection: Some(config.collection.clone()),
        },
    };
    print!("{}", toml::to_string_pretty(&resolved)?);
    Ok(())
}
