//! Store facade: lifecycle, lookup and record operations.

use crate::config::StoreConfig;
use crate::descriptor::Descriptor;
use crate::error::{CoreError, CoreResult};
use crate::import::SourceReader;
use crate::paths::StorePaths;
use crate::segment::Segment;
use crate::types::{CreateSummary, Found, Location, SkippedRow, SlotRef};
use slotdb_codec::{CodecError, Record, RecordCodec, Slot};
use slotdb_storage::{FileBackend, StorageError};
use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// A single-user record store over a sorted segment and an overflow segment.
///
/// `Store` is the entry point for every record operation:
/// - [`create`](Store::create) bootstraps the store files from an import
///   source, once
/// - [`open`](Store::open) / [`close`](Store::close) attach and detach them
/// - [`find`](Store::find) binary-searches the sorted segment, then scans the
///   overflow segment
/// - [`add`](Store::add) appends to the overflow segment; new keys never enter
///   the sorted segment
/// - [`update`](Store::update) and [`delete`](Store::delete) rewrite a slot
///   in place
///
/// # Single process
///
/// The store assumes it is the only user of its files. Opening takes an
/// advisory lock on the sorted file so a second handle is refused
/// ([`CoreError::StoreLocked`]); nothing else guards against concurrent writers.
///
/// # Example
///
/// ```rust,ignore
/// use slotdb_core::{Record, Store};
///
/// let mut store = Store::new();
/// store.create("people")?;          // reads people.csv
/// store.open("people")?;
///
/// store.add(&Record::new("9", "TX", "Austin", "Carl"))?;
/// let found = store.find("9")?.expect("just added");
/// println!("{} at {}", found.record, found.slot());
///
/// store.close()?;
/// ```
#[derive(Debug, Default)]
pub struct Store {
    /// Configuration.
    config: StoreConfig,
    /// Attached segments. `None` while the store is closed.
    inner: Option<OpenStore>,
}

/// Segments and file layout of an open store.
#[derive(Debug)]
struct OpenStore {
    paths: StorePaths,
    sorted: Segment,
    overflow: Segment,
}

impl Store {
    /// Creates a closed store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a closed store with a custom configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            inner: None,
        }
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Checks if the store is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    /// Returns the descriptor of the open store, or `None` when closed.
    #[must_use]
    pub fn descriptor(&self) -> Option<Descriptor> {
        self.inner.as_ref().map(OpenStore::descriptor)
    }

    /// Creates the store files for `name` from the import source `<name>.csv`.
    ///
    /// Rows are written to the sorted segment in source order, which must
    /// already be ascending by key. Rows the codec rejects (for example
    /// oversized ones) are skipped and listed in the summary. The store is
    /// closed again before returning.
    ///
    /// # Errors
    ///
    /// - [`CoreError::MissingSource`] if `<name>.csv` does not exist
    /// - [`CoreError::AlreadyExists`] if `<name>.data` already exists
    /// - [`CoreError::InvalidSource`] if a source row does not parse
    /// - [`CoreError::InvalidOperation`] if this store is open
    pub fn create(&mut self, name: impl AsRef<Path>) -> CoreResult<CreateSummary> {
        let paths = StorePaths::new(name);
        let source = paths.source_path();
        if !source.is_file() {
            return Err(CoreError::MissingSource {
                path: source.display().to_string(),
            });
        }

        let reader = SourceReader::new(BufReader::new(File::open(&source)?))
            .underscores_as_spaces(self.config.underscores_as_spaces);
        let rows = reader.collect::<CoreResult<Vec<_>>>()?;

        self.build(paths, rows)
    }

    /// Creates the store files for `name` from rows already in memory.
    ///
    /// Behaves like [`create`](Store::create) without reading a source file.
    ///
    /// # Errors
    ///
    /// - [`CoreError::AlreadyExists`] if `<name>.data` already exists
    /// - [`CoreError::InvalidOperation`] if this store is open
    pub fn create_from_rows<I>(&mut self, name: impl AsRef<Path>, rows: I) -> CoreResult<CreateSummary>
    where
        I: IntoIterator<Item = Record>,
    {
        self.build(StorePaths::new(name), rows)
    }

    fn build<I>(&mut self, paths: StorePaths, rows: I) -> CoreResult<CreateSummary>
    where
        I: IntoIterator<Item = Record>,
    {
        if self.is_open() {
            return Err(CoreError::invalid_operation(
                "close the current store before creating another",
            ));
        }

        let data_path = paths.data_path();
        if data_path.exists() {
            return Err(CoreError::AlreadyExists {
                path: data_path.display().to_string(),
            });
        }

        let codec = RecordCodec::new(self.config.record_width)?;
        let result = self.import(paths.clone(), codec, rows);
        if result.is_err() {
            remove_partial(&paths);
        }
        result
    }

    /// Writes the segments and descriptor of a new store. The store is left
    /// closed whether or not this succeeds.
    fn import<I>(
        &mut self,
        paths: StorePaths,
        codec: RecordCodec,
        rows: I,
    ) -> CoreResult<CreateSummary>
    where
        I: IntoIterator<Item = Record>,
    {
        let data_path = paths.data_path();
        let data = FileBackend::create(&data_path)?;
        lock(&data)?;
        let overflow = FileBackend::create(&paths.overflow_path())?;

        let mut sorted = Segment::new(Box::new(data), codec, 0);
        let overflow = Segment::new(Box::new(overflow), codec, 0);

        let mut summary = CreateSummary::default();
        let mut previous_key: Option<i64> = None;
        for row in rows {
            let key = row.id.trim().parse::<i64>().ok();
            let appended = match key {
                Some(_) => sorted.append(&row),
                None => Err(
                    CodecError::invalid_key(&row.id, "sorted keys must be integers").into(),
                ),
            };

            match appended {
                Ok(_) => summary.imported += 1,
                Err(CoreError::Codec(err)) => {
                    warn!(
                        id = %row.id,
                        state = %row.state,
                        city = %row.city,
                        name = %row.name,
                        "skipping import row: {err}"
                    );
                    summary.skipped.push(SkippedRow { record: row, error: err });
                    continue;
                }
                Err(err) => return Err(err),
            }

            if let (Some(prev), Some(key)) = (previous_key, key) {
                if key < prev {
                    warn!(key, previous = prev, "import rows are not sorted by key");
                }
            }
            previous_key = key;
        }

        info!(
            store = %paths.base().display(),
            imported = summary.imported,
            skipped = summary.skipped.len(),
            "created store"
        );

        self.inner = Some(OpenStore {
            paths,
            sorted,
            overflow,
        });
        self.close()?;

        Ok(summary)
    }

    /// Opens the store files for `name`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::StoreMissing`] if a store file is absent
    /// - [`CoreError::InvalidDescriptor`] if the descriptor does not parse
    /// - [`CoreError::Corrupted`] if a segment is shorter than its count says
    /// - [`CoreError::StoreLocked`] if another handle has the store open
    /// - [`CoreError::InvalidOperation`] if this store is already open
    pub fn open(&mut self, name: impl AsRef<Path>) -> CoreResult<()> {
        if self.is_open() {
            return Err(CoreError::invalid_operation(
                "close the current store before opening another",
            ));
        }

        let paths = StorePaths::new(name);
        let data_path = paths.data_path();
        let overflow_path = paths.overflow_path();
        for path in [&data_path, &overflow_path] {
            if !path.is_file() {
                return Err(CoreError::store_missing(path));
            }
        }

        let descriptor = paths.load_descriptor()?;
        let codec = RecordCodec::new(descriptor.record_width)?;

        // Handles opened here are dropped on any early return below.
        let data = FileBackend::open(&data_path)?;
        lock(&data)?;
        let overflow = FileBackend::open(&overflow_path)?;

        let sorted = Segment::new(Box::new(data), codec, descriptor.sorted_count);
        let overflow = Segment::new(Box::new(overflow), codec, descriptor.overflow_count);
        sorted.validate()?;
        overflow.validate()?;

        info!(
            store = %paths.base().display(),
            record_width = descriptor.record_width,
            sorted = descriptor.sorted_count,
            overflow = descriptor.overflow_count,
            "opened store"
        );

        self.inner = Some(OpenStore {
            paths,
            sorted,
            overflow,
        });
        Ok(())
    }

    /// Closes the store.
    ///
    /// Flushes both segments, then writes the descriptor. Closing a closed
    /// store does nothing. The store is detached even if persisting fails.
    pub fn close(&mut self) -> CoreResult<()> {
        let Some(mut inner) = self.inner.take() else {
            return Ok(());
        };

        let sync = self.config.sync_on_close;
        inner.sorted.flush(sync)?;
        inner.overflow.flush(sync)?;

        let descriptor = inner.descriptor();
        inner.paths.save_descriptor(&descriptor)?;

        info!(
            store = %inner.paths.base().display(),
            sorted = descriptor.sorted_count,
            overflow = descriptor.overflow_count,
            "closed store"
        );
        Ok(())
    }

    /// Looks up a record by key.
    ///
    /// The sorted segment is binary-searched comparing keys as integers; on a
    /// miss the overflow segment is scanned from index 0 comparing keys as
    /// text, so `"07"` matches a sorted `7` but not an overflow `7`. A key
    /// that is not an integer is only looked for in the overflow segment.
    ///
    /// Deleted slots are still found and yield an all-empty record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotOpen`] if the store is closed.
    pub fn find(&self, key: &str) -> CoreResult<Option<Found>> {
        let inner = self.inner()?;
        Ok(inner
            .locate(key)?
            .map(|(at, slot)| Found::new(slot, at)))
    }

    /// Appends a new record to the overflow segment.
    ///
    /// No duplicate check is made; the sorted segment is never touched.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotOpen`] if the store is closed
    /// - [`CoreError::Codec`] if the record is rejected (counts unchanged)
    pub fn add(&mut self, record: &Record) -> CoreResult<SlotRef> {
        let inner = self.inner_mut()?;
        let index = inner.overflow.append(record)?;

        debug!(key = %record.id, index, "added record to overflow");
        Ok(SlotRef::new(Location::Overflow, index))
    }

    /// Rewrites the fields of the record whose key is `record.id`.
    ///
    /// The record keeps its segment and index.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotOpen`] if the store is closed
    /// - [`CoreError::NotFound`] if no slot holds the key
    /// - [`CoreError::Codec`] if the new record is rejected (slot unchanged)
    pub fn update(&mut self, record: &Record) -> CoreResult<SlotRef> {
        let inner = self.inner_mut()?;
        let (at, _) = inner
            .locate(&record.id)?
            .ok_or_else(|| CoreError::not_found(&record.id))?;

        inner.segment_mut(at.location).overwrite(at.index, record)?;

        debug!(key = %record.id, location = %at.location, index = at.index, "updated record");
        Ok(at)
    }

    /// Deletes the record with `key` by blanking its slot.
    ///
    /// The slot stays allocated and both counts are unchanged; a later
    /// [`find`](Store::find) returns an all-empty record at the same index.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotOpen`] if the store is closed
    /// - [`CoreError::NotFound`] if no slot holds the key
    pub fn delete(&mut self, key: &str) -> CoreResult<SlotRef> {
        let inner = self.inner_mut()?;
        let (at, slot) = inner
            .locate(key)?
            .ok_or_else(|| CoreError::not_found(key))?;

        inner.segment_mut(at.location).tombstone(at.index, slot.key())?;

        debug!(key, location = %at.location, index = at.index, "deleted record");
        Ok(at)
    }

    /// Returns the first records of the sorted segment, up to the configured
    /// report limit.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotOpen`] if the store is closed.
    pub fn report(&self) -> CoreResult<Vec<Record>> {
        self.report_with_limit(self.config.report_limit)
    }

    /// Returns the first `min(limit, sorted_count)` sorted records in index
    /// order. Deleted slots appear as all-empty records.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotOpen`] if the store is closed.
    pub fn report_with_limit(&self, limit: usize) -> CoreResult<Vec<Record>> {
        let inner = self.inner()?;
        inner
            .sorted
            .slots(0..limit as u64)
            .map(|item| item.map(|(_, slot)| slot.into_record()))
            .collect()
    }

    fn inner(&self) -> CoreResult<&OpenStore> {
        self.inner.as_ref().ok_or(CoreError::NotOpen)
    }

    fn inner_mut(&mut self) -> CoreResult<&mut OpenStore> {
        self.inner.as_mut().ok_or(CoreError::NotOpen)
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            error!("failed to close store on drop: {err}");
        }
    }
}

impl OpenStore {
    fn descriptor(&self) -> Descriptor {
        Descriptor {
            record_width: self.sorted.width(),
            sorted_count: self.sorted.len(),
            overflow_count: self.overflow.len(),
        }
    }

    fn segment_mut(&mut self, location: Location) -> &mut Segment {
        match location {
            Location::Sorted => &mut self.sorted,
            Location::Overflow => &mut self.overflow,
        }
    }

    /// Binary search over the sorted segment, then linear scan of overflow.
    fn locate(&self, key: &str) -> CoreResult<Option<(SlotRef, Slot)>> {
        if let Some((index, slot)) = self.search_sorted(key)? {
            debug!(key, index, "found in sorted segment");
            return Ok(Some((SlotRef::new(Location::Sorted, index), slot)));
        }

        for item in self.overflow.slots(0..self.overflow.len()) {
            let (index, slot) = item?;
            if slot.key() == key {
                debug!(key, index, "found in overflow segment");
                return Ok(Some((SlotRef::new(Location::Overflow, index), slot)));
            }
        }

        debug!(key, "key not found");
        Ok(None)
    }

    fn search_sorted(&self, key: &str) -> CoreResult<Option<(u64, Slot)>> {
        let Ok(target) = key.trim().parse::<i64>() else {
            debug!(key, "key is not an integer; skipping sorted segment");
            return Ok(None);
        };

        // Half-open [low, high); mid matches the inclusive (low + high) / 2 probe.
        let mut low = 0u64;
        let mut high = self.sorted.len();
        while low < high {
            let mid = low + (high - low - 1) / 2;
            let slot = self.sorted.read(mid)?;
            let mid_key = slot.key().trim().parse::<i64>().map_err(|_| {
                CoreError::corrupted(format!(
                    "sorted slot {mid} has non-integer key {:?}",
                    slot.key()
                ))
            })?;

            match mid_key.cmp(&target) {
                Ordering::Equal => return Ok(Some((mid, slot))),
                Ordering::Greater => high = mid,
                Ordering::Less => low = mid + 1,
            }
        }

        Ok(None)
    }
}

/// Removes whatever a failed create left behind.
fn remove_partial(paths: &StorePaths) {
    for path in [paths.data_path(), paths.overflow_path(), paths.config_path()] {
        match fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "removed partial store file"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!(path = %path.display(), "failed to remove partial store file: {err}"),
        }
    }
}

fn lock(backend: &FileBackend) -> CoreResult<()> {
    backend.try_lock().map_err(|err| match err {
        StorageError::Locked { path } => CoreError::StoreLocked { path },
        other => other.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn rows() -> Vec<Record> {
        vec![
            Record::new("1", "CA", "LA", "Alice"),
            Record::new("5", "NY", "NYC", "Bob"),
        ]
    }

    fn open_store(rows: Vec<Record>) -> (TempDir, Store) {
        let dir = tempdir().unwrap();
        let name = dir.path().join("people");
        let mut store = Store::new();
        store.create_from_rows(&name, rows).unwrap();
        store.open(&name).unwrap();
        (dir, store)
    }

    #[test]
    fn new_store_is_closed() {
        let store = Store::new();
        assert!(!store.is_open());
        assert!(store.descriptor().is_none());
    }

    #[test]
    fn create_writes_three_files_and_closes() {
        let dir = tempdir().unwrap();
        let name = dir.path().join("people");
        let mut store = Store::new();

        let summary = store.create_from_rows(&name, rows()).unwrap();

        assert_eq!(summary.imported, 2);
        assert!(summary.skipped.is_empty());
        assert!(!store.is_open());
        let paths = StorePaths::new(&name);
        assert_eq!(fs::metadata(paths.data_path()).unwrap().len(), 400);
        assert_eq!(fs::metadata(paths.overflow_path()).unwrap().len(), 0);
        assert_eq!(fs::read_to_string(paths.config_path()).unwrap(), "200\n2\n0\n");
    }

    #[test]
    fn create_twice_fails() {
        let dir = tempdir().unwrap();
        let name = dir.path().join("people");
        let mut store = Store::new();
        store.create_from_rows(&name, rows()).unwrap();

        let result = store.create_from_rows(&name, rows());
        assert!(matches!(result, Err(CoreError::AlreadyExists { .. })));
    }

    #[test]
    fn create_without_source_fails() {
        let dir = tempdir().unwrap();
        let mut store = Store::new();

        let result = store.create(dir.path().join("people"));
        assert!(matches!(result, Err(CoreError::MissingSource { .. })));
        assert!(!StorePaths::new(dir.path().join("people")).data_path().exists());
    }

    #[test]
    fn create_reads_csv_source() {
        let dir = tempdir().unwrap();
        let name = dir.path().join("people");
        fs::write(
            StorePaths::new(&name).source_path(),
            "\"1\",\"CA\",\"Los_Angeles\",\"Alice\"\n\"5\",\"NY\",\"NYC\",\"Bob\"\n",
        )
        .unwrap();

        let mut store = Store::new();
        assert_eq!(store.create(&name).unwrap().imported, 2);

        store.open(&name).unwrap();
        let found = store.find("1").unwrap().unwrap();
        assert_eq!(found.record.city, "Los Angeles");
    }

    #[test]
    fn failed_create_leaves_no_files_behind() {
        let dir = tempdir().unwrap();
        let name = dir.path().join("people");
        let paths = StorePaths::new(&name);
        // A directory in the way makes the descriptor save fail after import.
        fs::create_dir(dir.path().join("people.config.tmp")).unwrap();

        let mut store = Store::new();
        let err = store.create_from_rows(&name, rows()).unwrap_err();

        assert!(matches!(err, CoreError::Io(_)));
        assert!(!store.is_open());
        assert!(!paths.data_path().exists());
        assert!(!paths.overflow_path().exists());
        assert!(!paths.config_path().exists());

        fs::remove_dir(dir.path().join("people.config.tmp")).unwrap();
        assert_eq!(store.create_from_rows(&name, rows()).unwrap().imported, 2);
        store.open(&name).unwrap();
        assert_eq!(store.find("5").unwrap().unwrap().record.name, "Bob");
    }

    #[test]
    fn create_skips_non_integer_keys() {
        let dir = tempdir().unwrap();
        let name = dir.path().join("people");
        let mut store = Store::new();

        let summary = store
            .create_from_rows(
                &name,
                vec![
                    Record::new("1", "CA", "LA", "Alice"),
                    Record::new("abc", "CA", "LA", "Nobody"),
                    Record::new("3", "WA", "Oly", "Cy"),
                ],
            )
            .unwrap();

        assert_eq!(summary.imported, 2);
        assert!(matches!(
            summary.skipped[0].error,
            CodecError::InvalidKey { .. }
        ));

        store.open(&name).unwrap();
        assert_eq!(store.find("3").unwrap().unwrap().index, 1);
        assert!(store.find("abc").unwrap().is_none());
    }

    #[test]
    fn create_skips_oversized_rows() {
        let dir = tempdir().unwrap();
        let name = dir.path().join("people");
        let mut store = Store::with_config(StoreConfig::new().record_width(32));

        let summary = store
            .create_from_rows(
                &name,
                vec![
                    Record::new("1", "CA", "LA", "Alice"),
                    Record::new("2", "CA", "LA", "A name much too long to fit"),
                    Record::new("3", "WA", "Oly", "Cy"),
                ],
            )
            .unwrap();

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped.len(), 1);
        assert!(matches!(
            summary.skipped[0].error,
            CodecError::OversizedRecord { .. }
        ));

        store.open(&name).unwrap();
        assert_eq!(store.descriptor().unwrap().sorted_count, 2);
        assert_eq!(store.find("3").unwrap().unwrap().index, 1);
    }

    #[test]
    fn open_missing_store_fails() {
        let dir = tempdir().unwrap();
        let mut store = Store::new();

        let result = store.open(dir.path().join("nothing"));
        assert!(matches!(result, Err(CoreError::StoreMissing { .. })));
        assert!(!store.is_open());
    }

    #[test]
    fn open_twice_fails() {
        let (dir, mut store) = open_store(rows());
        let result = store.open(dir.path().join("people"));
        assert!(matches!(result, Err(CoreError::InvalidOperation { .. })));
        assert!(store.is_open());
    }

    #[test]
    fn operations_on_closed_store_fail() {
        let mut store = Store::new();
        let record = Record::new("1", "CA", "LA", "Alice");

        assert!(matches!(store.find("1"), Err(CoreError::NotOpen)));
        assert!(matches!(store.add(&record), Err(CoreError::NotOpen)));
        assert!(matches!(store.update(&record), Err(CoreError::NotOpen)));
        assert!(matches!(store.delete("1"), Err(CoreError::NotOpen)));
        assert!(matches!(store.report(), Err(CoreError::NotOpen)));
        assert!(store.close().is_ok());
    }

    #[test]
    fn find_in_sorted_segment() {
        let (_dir, store) = open_store(rows());

        let found = store.find("5").unwrap().unwrap();
        assert_eq!(found.record, Record::new("5", "NY", "NYC", "Bob"));
        assert_eq!(found.slot(), SlotRef::new(Location::Sorted, 1));
    }

    #[test]
    fn find_compares_sorted_keys_numerically() {
        let (_dir, store) = open_store(rows());

        let found = store.find("05").unwrap().unwrap();
        assert_eq!(found.slot(), SlotRef::new(Location::Sorted, 1));
    }

    #[test]
    fn find_compares_overflow_keys_textually() {
        let (_dir, mut store) = open_store(rows());
        store.add(&Record::new("9", "TX", "Austin", "Carl")).unwrap();

        assert!(store.find("09").unwrap().is_none());
        assert_eq!(
            store.find("9").unwrap().unwrap().slot(),
            SlotRef::new(Location::Overflow, 0)
        );
    }

    #[test]
    fn find_non_numeric_key_only_scans_overflow() {
        let (_dir, mut store) = open_store(rows());
        store.add(&Record::new("x7", "TX", "Waco", "Dee")).unwrap();

        let found = store.find("x7").unwrap().unwrap();
        assert_eq!(found.location, Location::Overflow);
        assert!(store.find("abc").unwrap().is_none());
    }

    #[test]
    fn find_absent_key() {
        let (_dir, store) = open_store(rows());
        assert!(store.find("3").unwrap().is_none());
        assert!(store.find("0").unwrap().is_none());
        assert!(store.find("6").unwrap().is_none());
    }

    #[test]
    fn add_goes_to_overflow() {
        let (_dir, mut store) = open_store(rows());

        let at = store.add(&Record::new("2", "OR", "Salem", "Ann")).unwrap();

        assert_eq!(at, SlotRef::new(Location::Overflow, 0));
        let descriptor = store.descriptor().unwrap();
        assert_eq!(descriptor.sorted_count, 2);
        assert_eq!(descriptor.overflow_count, 1);
    }

    #[test]
    fn add_oversized_is_rejected_and_store_stays_usable() {
        let (_dir, mut store) = open_store(rows());

        let err = store
            .add(&Record::new("2", "OR", "Salem", "x".repeat(300)))
            .unwrap_err();

        assert!(err.is_oversized());
        assert!(store.is_open());
        assert_eq!(store.descriptor().unwrap().overflow_count, 0);
        store.add(&Record::new("2", "OR", "Salem", "Ann")).unwrap();
    }

    #[test]
    fn update_keeps_location() {
        let (_dir, mut store) = open_store(rows());
        store.add(&Record::new("9", "TX", "Austin", "Carl")).unwrap();

        let sorted = store.update(&Record::new("1", "CA", "SF", "Alicia")).unwrap();
        let overflow = store.update(&Record::new("9", "TX", "Dallas", "Carl")).unwrap();

        assert_eq!(sorted, SlotRef::new(Location::Sorted, 0));
        assert_eq!(overflow, SlotRef::new(Location::Overflow, 0));
        assert_eq!(store.find("1").unwrap().unwrap().record.city, "SF");
        assert_eq!(store.find("9").unwrap().unwrap().record.city, "Dallas");
    }

    #[test]
    fn update_missing_key_fails() {
        let (_dir, mut store) = open_store(rows());
        let err = store.update(&Record::new("4", "A", "B", "C")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn delete_leaves_findable_tombstone() {
        let (_dir, mut store) = open_store(rows());

        let at = store.delete("1").unwrap();
        assert_eq!(at, SlotRef::new(Location::Sorted, 0));

        let found = store.find("1").unwrap().unwrap();
        assert!(found.is_tombstone());
        assert_eq!(found.record, Record::tombstone());
        assert_eq!(found.slot(), SlotRef::new(Location::Sorted, 0));
        assert_eq!(store.descriptor().unwrap().sorted_count, 2);

        // The neighbour is still reachable through the binary search.
        assert_eq!(store.find("5").unwrap().unwrap().index, 1);
    }

    #[test]
    fn delete_missing_key_fails() {
        let (_dir, mut store) = open_store(rows());
        assert!(store.delete("42").unwrap_err().is_not_found());
    }

    #[test]
    fn report_is_capped_by_limit() {
        let rows: Vec<Record> = (1..=15)
            .map(|i| Record::new(i.to_string(), "ST", "City", format!("P{i}")))
            .collect();
        let (_dir, store) = open_store(rows);

        let report = store.report().unwrap();
        assert_eq!(report.len(), 10);
        assert_eq!(report[0].id, "1");
        assert_eq!(report[9].id, "10");

        assert_eq!(store.report_with_limit(100).unwrap().len(), 15);
        assert_eq!(store.report().unwrap(), report);
    }

    #[test]
    fn close_persists_counts_and_reopen_restores() {
        let (dir, mut store) = open_store(rows());
        let name = dir.path().join("people");
        store.add(&Record::new("9", "TX", "Austin", "Carl")).unwrap();
        store.close().unwrap();

        assert!(!store.is_open());
        assert_eq!(
            fs::read_to_string(StorePaths::new(&name).config_path()).unwrap(),
            "200\n2\n1\n"
        );

        store.open(&name).unwrap();
        assert_eq!(store.find("9").unwrap().unwrap().location, Location::Overflow);
    }

    #[test]
    fn second_handle_is_locked_out() {
        let (dir, _store) = open_store(rows());

        let mut other = Store::new();
        let result = other.open(dir.path().join("people"));
        assert!(matches!(result, Err(CoreError::StoreLocked { .. })));
    }

    #[test]
    fn open_detects_truncated_segment() {
        let dir = tempdir().unwrap();
        let name = dir.path().join("people");
        Store::new().create_from_rows(&name, rows()).unwrap();

        let paths = StorePaths::new(&name);
        let file = fs::OpenOptions::new()
            .write(true)
            .open(paths.data_path())
            .unwrap();
        file.set_len(250).unwrap();
        drop(file);

        let result = Store::new().open(&name);
        assert!(matches!(result, Err(CoreError::Corrupted { .. })));
    }

    #[test]
    fn open_uses_descriptor_width() {
        let dir = tempdir().unwrap();
        let name = dir.path().join("people");
        Store::with_config(StoreConfig::new().record_width(48))
            .create_from_rows(&name, rows())
            .unwrap();

        let mut store = Store::new();
        store.open(&name).unwrap();
        assert_eq!(store.descriptor().unwrap().record_width, 48);
        assert_eq!(store.find("5").unwrap().unwrap().record.name, "Bob");
    }

    #[test]
    fn drop_closes_store() {
        let dir = tempdir().unwrap();
        let name = dir.path().join("people");
        {
            let mut store = Store::new();
            store.create_from_rows(&name, rows()).unwrap();
            store.open(&name).unwrap();
            store.add(&Record::new("9", "TX", "Austin", "Carl")).unwrap();
        }

        let descriptor = StorePaths::new(&name).load_descriptor().unwrap();
        assert_eq!(descriptor.overflow_count, 1);
    }
}
