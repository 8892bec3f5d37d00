//! Configuration module
//!
//! This module handles:
//! - Store connection settings (URI, database, collection)
//! - User-level config file (~/.config/log-stats/config.toml)
//! - Environment and CLI overrides

mod user_config;

pub use user_config::{StoreConfig, StoreSection, UserConfig};
