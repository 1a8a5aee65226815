//! # SlotDB Core
//!
//! Storage engine for SlotDB, a single-user record store built on two flat
//! files of fixed-width slots.
//!
//! This crate provides:
//! - [`Segment`]: slot-indexed reads and writes over one file
//! - [`Store`]: the sorted + overflow segment pair, with binary search on the
//!   sorted segment and a linear scan fallback on the overflow segment
//! - [`Descriptor`] and [`StorePaths`]: the on-disk layout and its metadata
//! - [`SourceReader`]: the one-time CSV import feeding [`Store::create`]

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod descriptor;
mod error;
mod import;
mod paths;
mod segment;
mod store;
mod types;

pub use config::StoreConfig;
pub use descriptor::Descriptor;
pub use error::{CoreError, CoreResult};
pub use import::SourceReader;
pub use paths::StorePaths;
pub use segment::Segment;
pub use store::Store;
pub use types::{CreateSummary, Found, Location, SkippedRow, SlotRef};

pub use slotdb_codec::{CodecError, Record, RecordCodec, Slot, DEFAULT_RECORD_WIDTH};

/// SlotDB version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
