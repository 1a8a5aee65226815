//! Error types for SlotDB core.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in SlotDB core operations.
///
/// Only [`CoreError::Io`] and [`CoreError::Storage`] stand for unrecoverable
/// disk failures. Every other variant is an ordinary outcome the caller can
/// report and carry on from; the store stays usable.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] slotdb_storage::StorageError),

    /// Record line codec error, including oversized records.
    #[error("{0}")]
    Codec(#[from] slotdb_codec::CodecError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The store is closed.
    #[error("store is not open")]
    NotOpen,

    /// No slot in either segment holds the key.
    #[error("record not found: {key}")]
    NotFound {
        /// The key that was searched for.
        key: String,
    },

    /// Slot index outside the valid slots of a segment.
    #[error("slot index {index} out of range (segment holds {count} records)")]
    OutOfRange {
        /// Requested index.
        index: u64,
        /// Number of valid slots.
        count: u64,
    },

    /// The import source file does not exist.
    #[error("import source not found: {path}")]
    MissingSource {
        /// Expected source path.
        path: String,
    },

    /// The store files already exist.
    #[error("store already exists: {path}")]
    AlreadyExists {
        /// Path of the existing sorted file.
        path: String,
    },

    /// One of the store files is absent.
    #[error("store file not found: {path}")]
    StoreMissing {
        /// Path of the missing file.
        path: String,
    },

    /// The descriptor file is unreadable.
    #[error("invalid descriptor: {message}")]
    InvalidDescriptor {
        /// Description of the problem.
        message: String,
    },

    /// A row of the import source does not parse.
    #[error("invalid import source at line {line}: {message}")]
    InvalidSource {
        /// 1-based line number in the source.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// Segment content disagrees with the descriptor.
    #[error("store corrupted: {message}")]
    Corrupted {
        /// Description of the corruption.
        message: String,
    },

    /// Another handle has the store open.
    #[error("store locked: another process has {path} open")]
    StoreLocked {
        /// Path of the locked file.
        path: String,
    },

    /// Operation not permitted in current state.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Description of why operation is invalid.
        message: String,
    },
}

impl CoreError {
    /// Creates a not found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates an invalid descriptor error.
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            message: message.into(),
        }
    }

    /// Creates a corruption error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::Corrupted {
            message: message.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Creates a store missing error for `path`.
    pub fn store_missing(path: &Path) -> Self {
        Self::StoreMissing {
            path: path.display().to_string(),
        }
    }

    /// Returns whether this is a [`CoreError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns whether this is a rejected oversized record.
    #[must_use]
    pub fn is_oversized(&self) -> bool {
        matches!(
            self,
            Self::Codec(slotdb_codec::CodecError::OversizedRecord { .. })
        )
    }
}
