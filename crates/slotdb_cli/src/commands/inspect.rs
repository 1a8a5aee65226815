//! Inspect command implementation.

use super::{fail, open_store};
use serde::Serialize;
use slotdb_core::{Store, StorePaths};
use std::fs;
use std::path::Path;

/// Store inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Store base name.
    pub path: String,
    /// Slot width in bytes.
    pub record_width: usize,
    /// Number of slots in the sorted file.
    pub sorted_count: u64,
    /// Number of slots in the overflow file.
    pub overflow_count: u64,
    /// Deleted slots in the sorted file.
    pub sorted_tombstones: u64,
    /// Sorted file size in bytes.
    pub data_size: u64,
    /// Overflow file size in bytes.
    pub overflow_size: u64,
}

/// Collects metadata for an open store.
pub fn inspect(store: &Store, paths: &StorePaths) -> Result<InspectResult, Box<dyn std::error::Error>> {
    let descriptor = store.descriptor().ok_or("store is not open")?;
    let sorted_tombstones = store
        .report_with_limit(usize::try_from(descriptor.sorted_count)?)
        .map_err(fail)?
        .iter()
        .filter(|record| record.is_tombstone())
        .count() as u64;

    Ok(InspectResult {
        path: paths.base().display().to_string(),
        record_width: descriptor.record_width,
        sorted_count: descriptor.sorted_count,
        overflow_count: descriptor.overflow_count,
        sorted_tombstones,
        data_size: fs::metadata(paths.data_path())?.len(),
        overflow_size: fs::metadata(paths.overflow_path())?.len(),
    })
}

/// Runs the inspect command.
pub fn run(name: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(name).map_err(fail)?;
    let result = inspect(&store, &StorePaths::new(name))?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("SlotDB Store: {}", result.path);
    println!("================================");
    println!();
    println!("Layout:");
    println!("  Record width:   {} bytes", result.record_width);
    println!("  Data size:      {} bytes", result.data_size);
    println!("  Overflow size:  {} bytes", result.overflow_size);
    println!();
    println!("Records:");
    println!("  Sorted slots:   {}", result.sorted_count);
    println!("  Deleted sorted: {}", result.sorted_tombstones);
    println!("  Overflow slots: {}", result.overflow_count);
}
