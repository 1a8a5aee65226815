//! Report command implementation.

use super::{fail, open_store};
use slotdb_core::Record;
use std::path::Path;

/// Formats report lines, one record per line.
pub fn render(records: &[Record]) -> String {
    records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs the report command.
pub fn run(
    name: &Path,
    limit: Option<usize>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(name).map_err(fail)?;
    let records = match limit {
        Some(limit) => store.report_with_limit(limit),
        None => store.report(),
    }
    .map_err(fail)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&records)?),
        _ if records.is_empty() => println!("No records"),
        _ => println!("{}", render(&records)),
    }

    Ok(())
}
