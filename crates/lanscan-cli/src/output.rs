//! Report rendering

use clap::ValueEnum;
use lanscan_core::HostEntry;
use lanscan_discovery::DiscoveryReport;

/// Total width of a table line
pub const TABLE_WIDTH: usize = 53;
const COLUMN_WIDTH: usize = 25;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Bordered two-column table
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Render a report in the requested format
pub fn render(report: &DiscoveryReport, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(render_table(&report.entries())),
        OutputFormat::Json => serde_json::to_string_pretty(report),
    }
}

/// Render host entries as a fixed-width table, the local host marked "(Host)"
pub fn render_table(entries: &[HostEntry]) -> String {
    let rule = "-".repeat(TABLE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        row("| IP Address", "Hardware Address |"),
        rule.clone(),
    ];

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            lines.push(rule.clone());
        }
        let ip = if entry.local {
            format!("| {} (Host)", entry.ip_address)
        } else {
            format!("| {}", entry.ip_address)
        };
        lines.push(row(&ip, &format!("{} |", entry.hardware_address)));
    }

    lines.push(rule);
    lines.join("\n")
}

fn row(left: &str, right: &str) -> String {
    format!("{:<width$} | {:>width$}", left, right, width = COLUMN_WIDTH)
}
