//! Single record commands: get, add, update and delete.

use super::{fail, open_store};
use clap::Args;
use slotdb_core::{Found, Record};
use std::path::{Path, PathBuf};

/// Arguments naming a store and a full record.
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Store base name, without extension
    pub name: PathBuf,
    /// Record id
    pub id: String,
    /// State
    pub state: String,
    /// City
    pub city: String,
    /// Person name
    pub person: String,
}

impl RecordArgs {
    fn record(&self) -> Record {
        Record::new(&self.id, &self.state, &self.city, &self.person)
    }
}

/// Formats a lookup result for display.
pub fn describe(found: &Found) -> String {
    format!(
        "Record at {}.\nID: {}\nstate: {}\ncity: {}\nname: {}",
        found.slot(),
        found.record.id,
        found.record.state,
        found.record.city,
        found.record.name
    )
}

/// Runs the get command.
pub fn get(name: &Path, id: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(name).map_err(fail)?;
    let found = store
        .find(id)
        .map_err(fail)?
        .ok_or("record not found")?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&found)?),
        _ => println!("{}", describe(&found)),
    }

    Ok(())
}

/// Runs the add command.
pub fn add(args: &RecordArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(&args.name).map_err(fail)?;
    let record = args.record();
    let at = store.add(&record).map_err(fail)?;
    store.close().map_err(fail)?;

    println!("Added a new record at {at}");
    println!("{record}");
    Ok(())
}

/// Runs the update command.
pub fn update(args: &RecordArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(&args.name).map_err(fail)?;
    let at = store.update(&args.record()).map_err(fail)?;
    store.close().map_err(fail)?;

    println!("Updated record {} at {at}", args.id);
    Ok(())
}

/// Runs the delete command.
pub fn delete(name: &Path, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(name).map_err(fail)?;
    let at = store.delete(id).map_err(fail)?;
    store.close().map_err(fail)?;

    println!("Deleted record {id} at {at}");
    Ok(())
}
