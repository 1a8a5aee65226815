//! Storage backend trait definition.

use crate::error::StorageResult;

/// A low-level storage backend for SlotDB.
///
/// Storage backends are **opaque byte stores** addressed by offset. They
/// provide simple operations for reading, overwriting and flushing data.
/// SlotDB owns all file format interpretation - backends do not understand
/// slots, records or descriptors.
///
/// # Invariants
///
/// - `write_at` replaces exactly `data.len()` bytes starting at `offset`
/// - `read_at` returns exactly the bytes most recently written at that range
/// - `write_at` may extend the storage, but never leaves a hole
/// - Backends must be `Send + Sync`
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send + Sync {
    /// Reads `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The offset is beyond the current size
    /// - The read would extend beyond the current size
    /// - An I/O error occurs
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>>;

    /// Writes `data` starting at `offset`, overwriting existing bytes.
    ///
    /// Writing at exactly the current size appends. Writes that overlap the
    /// end grow the storage accordingly.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `offset` is greater than the current size
    /// - An I/O error occurs
    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()>;

    /// Flushes all pending writes to the operating system.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush operation fails.
    fn flush(&mut self) -> StorageResult<()>;

    /// Returns the current size of the storage in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;

    /// Syncs all data and metadata to durable storage.
    ///
    /// This is a stronger guarantee than `flush` - it ensures that
    /// file metadata (size, timestamps) is also durable.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    fn sync(&mut self) -> StorageResult<()>;
}
