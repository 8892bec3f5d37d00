//! Plain text reporter
//!
//! ```text
//! 6 logs
//! Methods:
//! 	method GET: 3
//! 	...
//! 1 status check
//! ```

use crate::models::LogStats;

/// Render stats in the fixed line format
pub fn render(stats: &LogStats) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} logs\n", stats.total));
    out.push_str("Methods:\n");
    for (method, count) in &stats.methods {
        out.push_str(&format!("\tmethod {}: {}\n", method, count));
    }
    out.push_str(&format!("{} status check\n", stats.status_checks));

    out
}
