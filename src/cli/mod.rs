//! CLI command definitions and handlers

mod config;
mod doctor;
mod import;
mod list;
mod stats;

use crate::config::{StoreConfig, StoreSection, UserConfig};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// log-stats - nginx access-log statistics from a document store
#[derive(Parser, Debug)]
#[command(name = "log-stats")]
#[command(
    version,
    about = "Nginx access-log statistics from MongoDB or a local redb file",
    long_about = "Counts nginx access-log documents by HTTP method and status checks.\n\n\
Run without a subcommand to print stats for logs.nginx on mongodb://localhost:27017/:\n  \
log-stats",
    after_help = "\
Examples:
  log-stats                                      Stats for logs.nginx on localhost
  log-stats --uri mongodb://db:27017/ stats      Stats from another server
  log-stats stats --grouped --format json        One aggregation query, JSON output
  log-stats --uri redb://./logs.redb import access.ndjson
  log-stats list --limit 10                      First 10 documents as JSON lines"
)]
pub struct Cli {
    /// Store URI: mongodb://..., mongodb+srv://... or redb://<path>
    #[arg(long, global = true, env = "LOG_STATS_URI")]
    pub uri: Option<String>,

    /// Database name (default: logs)
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Collection name (default: nginx)
    #[arg(long, global = true)]
    pub collection: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print total, per-method and status-check counts (default command)
    Stats {
        /// Count methods with one grouped aggregation instead of one query per method
        #[arg(long)]
        grouped: bool,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Print every document of the collection, one JSON object per line
    List {
        /// Stop after this many documents
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Load newline-delimited JSON documents into the collection
    Import {
        /// NDJSON file, or - for stdin
        file: PathBuf,
    },

    /// Check the configured store answers
    Doctor,

    /// Manage configuration (init or show)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize config file with example settings
    Init,
    /// Show config file path and resolved store settings
    Show,
}

impl Cli {
    fn overrides(&self) -> StoreSection {
        StoreSection {
            uri: self.uri.clone(),
            database: self.database.clone(),
            collection: self.collection.clone(),
        }
    }

    /// Store settings from config file, environment and flags
    fn store_config(&self) -> Result<StoreConfig> {
        Ok(UserConfig::load()?.resolve(&self.overrides()))
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Stats { grouped, format }) => {
            stats::run(&cli.store_config()?, *grouped, format)
        }

        Some(Commands::List { limit }) => list::run(&cli.store_config()?, *limit),

        Some(Commands::Import { file }) => import::run(&cli.store_config()?, file),

        Some(Commands::Doctor) => doctor::run(&cli.store_config()?),

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init => config::init(),
            ConfigAction::Show => config::show(&cli.store_config()?),
        },

        Some(Commands::Version) => {
            println!("log-stats {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }

        // Default: per-method stats as text
        None => stats::run(&cli.store_config()?, false, "text"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_parses() {
        let cli = Cli::try_parse_from(["log-stats"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "warn");
        assert!(cli.uri.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "log-stats",
            "stats",
            "--grouped",
            "--uri",
            "redb://x.redb",
            "--collection",
            "apache",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.uri.as_deref(), Some("redb://x.redb"));
        assert_eq!(overrides.collection.as_deref(), Some("apache"));
        assert!(overrides.database.is_none());
        assert!(matches!(
            cli.command,
            Some(Commands::Stats { grouped: true, .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["log-stats", "stats", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_import_needs_a_file() {
        assert!(Cli::try_parse_from(["log-stats", "import"]).is_err());
        let cli = Cli::try_parse_from(["log-stats", "import", "-"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Import { .. })));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
