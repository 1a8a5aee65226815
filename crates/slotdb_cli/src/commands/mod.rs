//! CLI command implementations.

pub mod create;
pub mod inspect;
pub mod record;
pub mod report;
pub mod shell;

use slotdb_core::{CodecError, CoreError, Store};
use std::path::Path;

/// Opens the store `name` with the default configuration.
pub fn open_store(name: &Path) -> Result<Store, CoreError> {
    let mut store = Store::new();
    store.open(name)?;
    Ok(store)
}

/// Renders an engine error the way the user should see it.
pub fn user_message(err: &CoreError) -> String {
    match err {
        CoreError::NotFound { .. } => "record not found".to_string(),
        CoreError::Codec(CodecError::OversizedRecord {
            id,
            state,
            city,
            name,
            ..
        }) => format!("The record is too long:\nID: {id}\nstate: {state}\ncity: {city}\nname: {name}"),
        other => other.to_string(),
    }
}

/// Converts an engine error into the boxed error returned by a command.
pub fn fail(err: CoreError) -> Box<dyn std::error::Error> {
    user_message(&err).into()
}
