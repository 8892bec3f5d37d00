//! Output reporters for log statistics
//!
//! Supports multiple output formats:
//! - `text` - The fixed line format (`N logs`, `Methods:`, ...)
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::models::LogStats;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render stats in the specified format
pub fn report(stats: &LogStats, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(stats, fmt)
}

/// Render stats using an OutputFormat enum
pub fn report_with_format(stats: &LogStats, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(stats)),
        OutputFormat::Json => json::render(stats),
    }
}
