//! Test fixtures and store helpers.
//!
//! Provides convenience functions for setting up stores on disk and writing
//! import sources.

use slotdb_codec::Record;
use slotdb_core::{Store, StoreConfig, StorePaths};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Base name used for fixture stores inside their temporary directory.
pub const FIXTURE_NAME: &str = "people";

/// An open store in a temporary directory, removed on drop.
pub struct TestStore {
    /// The store instance.
    pub store: Store,
    /// Base name of the store files.
    name: PathBuf,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TestStore {
    /// Creates a store from `rows` with the default configuration and opens it.
    pub fn from_rows(rows: Vec<Record>) -> Self {
        Self::with_config(StoreConfig::default(), rows)
    }

    /// Creates a store from `rows` with `config` and opens it.
    pub fn with_config(config: StoreConfig, rows: Vec<Record>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let name = temp_dir.path().join(FIXTURE_NAME);

        let mut store = Store::with_config(config);
        store
            .create_from_rows(&name, rows)
            .expect("Failed to create store");
        store.open(&name).expect("Failed to open store");

        Self {
            store,
            name,
            _temp_dir: temp_dir,
        }
    }

    /// Returns the base name of the store files.
    pub fn name(&self) -> &Path {
        &self.name
    }

    /// Returns the file layout of the store.
    pub fn paths(&self) -> StorePaths {
        StorePaths::new(&self.name)
    }

    /// Closes and reopens the store, as a restart would.
    pub fn reopen(&mut self) {
        self.store.close().expect("Failed to close store");
        self.store.open(&self.name).expect("Failed to reopen store");
    }
}

impl std::ops::Deref for TestStore {
    type Target = Store;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl std::ops::DerefMut for TestStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.store
    }
}

/// Runs a test against a freshly created and opened store.
pub fn with_store<F, R>(rows: Vec<Record>, f: F) -> R
where
    F: FnOnce(&mut Store) -> R,
{
    let mut test_store = TestStore::from_rows(rows);
    f(&mut test_store.store)
}

/// The two-row store used throughout the scenario tests.
pub fn sample_rows() -> Vec<Record> {
    vec![
        Record::new("1", "CA", "LA", "Alice"),
        Record::new("5", "NY", "NYC", "Bob"),
    ]
}

/// `count` rows with keys `step, 2 * step, ...` in ascending order.
pub fn numbered_rows(count: usize, step: i64) -> Vec<Record> {
    (1..=count as i64)
        .map(|i| {
            Record::new(
                (i * step).to_string(),
                "ST",
                format!("City {i}"),
                format!("Person {i}"),
            )
        })
        .collect()
}

/// Writes `rows` as a fully quoted import source `<dir>/<name>.csv` and
/// returns the store base name.
pub fn write_source(dir: &Path, name: &str, rows: &[Record]) -> PathBuf {
    let base = dir.join(name);
    let mut text = String::new();
    for row in rows {
        let fields = [&row.id, &row.state, &row.city, &row.name];
        let quoted: Vec<String> = fields
            .iter()
            .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
            .collect();
        text.push_str(&quoted.join(","));
        text.push('\n');
    }

    fs::write(StorePaths::new(&base).source_path(), text).expect("Failed to write source");
    base
}
