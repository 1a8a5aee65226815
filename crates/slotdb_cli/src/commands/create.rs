//! Create command implementation.

use super::fail;
use slotdb_core::Store;
use std::path::Path;

/// Runs the create command.
pub fn run(name: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Store::new();
    let summary = store.create(name).map_err(fail)?;

    println!("Database created");
    println!("  Records imported: {}", summary.imported);
    if !summary.skipped.is_empty() {
        println!("  Records skipped:  {}", summary.skipped.len());
        for row in &summary.skipped {
            println!("    {}: {}", row.record.id, row.error);
        }
    }

    Ok(())
}
