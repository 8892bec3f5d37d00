//! User-level configuration for log-stats
//!
//! Loaded from ~/.config/log-stats/config.toml. Flags and their environment
//! variables are applied on top by [`UserConfig::resolve`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_URI: &str = "mongodb://localhost:27017/";
pub const DEFAULT_DATABASE: &str = "logs";
pub const DEFAULT_COLLECTION: &str = "nginx";

/// Fully resolved store location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub store: StoreSection,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct StoreSection {
    /// Connection string: mongodb://..., mongodb+srv://... or redb://<path>
    pub uri: Option<String>,

    /// Database name (default: logs)
    pub database: Option<String>,

    /// Collection name (default: nginx)
    pub collection: Option<String>,
}

impl UserConfig {
    /// Load the user config file, if there is one
    ///
    /// A file that fails to parse is ignored with a warning.
    pub fn load() -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            match std::fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|content| Ok(toml::from_str::<UserConfig>(&content)?))
            {
                Ok(user_config) => config.merge(user_config),
                Err(e) => tracing::warn!("Ignoring {}: {}", path.display(), e),
            }
        }

        Ok(config)
    }

    /// Get the user config directory path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("log-stats").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.store.uri.is_some() {
            self.store.uri = other.store.uri;
        }
        if other.store.database.is_some() {
            self.store.database = other.store.database;
        }
        if other.store.collection.is_some() {
            self.store.collection = other.store.collection;
        }
    }

    /// Resolve the store location, applying per-invocation overrides on top
    pub fn resolve(&self, overrides: &StoreSection) -> StoreConfig {
        let defaults = StoreConfig::default();
        let pick = |over: &Option<String>, mine: &Option<String>, default: String| {
            over.clone().or_else(|| mine.clone()).unwrap_or(default)
        };

        StoreConfig {
            uri: pick(&overrides.uri, &self.store.uri, defaults.uri),
            database: pick(&overrides.database, &self.store.database, defaults.database),
            collection: pick(
                &overrides.collection,
                &self.store.collection,
                defaults.collection,
            ),
        }
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, EXAMPLE_CONFIG)?;
        }

        Ok(config_path)
    }
}

const EXAMPLE_CONFIG: &str = r#"# log-stats user configuration

[store]
# MongoDB server (default)
# uri = "mongodb://localhost:27017/"

# Or a local single-file store
# uri = "redb:///var/lib/log-stats/logs.redb"

# database = "logs"
# collection = "nginx"
"#;
