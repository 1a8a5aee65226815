//! # SlotDB Storage
//!
//! Storage backend trait and implementations for SlotDB.
//!
//! This crate provides the lowest-level storage abstraction for SlotDB.
//! Storage backends are **opaque byte stores** addressed by offset - they do
//! not interpret the data they store.
//!
//! ## Design Principles
//!
//! - Backends are simple positioned byte stores (read, write, flush)
//! - No knowledge of slots, records or the descriptor file
//! - Must be `Send + Sync`
//! - SlotDB owns all file format interpretation
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral storage
//! - [`FileBackend`] - For persistent storage using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use slotdb_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! backend.write_at(0, b"hello world").unwrap();
//! backend.write_at(6, b"there").unwrap();
//! let data = backend.read_at(0, 11).unwrap();
//! assert_eq!(&data, b"hello there");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
