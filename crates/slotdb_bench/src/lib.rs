//! Benchmark utilities.

use slotdb_codec::Record;
use slotdb_core::Store;
use tempfile::TempDir;

/// Generate `count` rows with ascending keys `0, 2, 4, ...`.
///
/// Even keys leave odd ones free for misses.
pub fn sorted_rows(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new(
                (i * 2).to_string(),
                "CA",
                format!("City number {i}"),
                format!("Person number {i}"),
            )
        })
        .collect()
}

/// Create and open a store from `rows` in a fresh temporary directory.
pub fn open_store(rows: Vec<Record>) -> (TempDir, Store) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let name = dir.path().join("bench");

    let mut store = Store::new();
    store
        .create_from_rows(&name, rows)
        .expect("Failed to create store");
    store.open(&name).expect("Failed to open store");
    (dir, store)
}
