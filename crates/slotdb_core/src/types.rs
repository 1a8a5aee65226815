//! Common types used throughout SlotDB core.

use serde::Serialize;
use slotdb_codec::{CodecError, Record, Slot};
use std::fmt;

/// Which segment a slot lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// The key-ordered primary segment (`.data`).
    Sorted,
    /// The append-only overflow segment (`.overflow`).
    Overflow,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sorted => write!(f, "data"),
            Self::Overflow => write!(f, "overflow"),
        }
    }
}

/// Address of one slot: segment plus index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SlotRef {
    /// Segment holding the slot.
    pub location: Location,
    /// Index of the slot within its segment.
    pub index: u64,
}

impl SlotRef {
    /// Creates a slot reference.
    #[must_use]
    pub const fn new(location: Location, index: u64) -> Self {
        Self { location, index }
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} in the {} file", self.index, self.location)
    }
}

/// Result of a successful lookup.
///
/// A deleted slot is still found; its `record` is then
/// [`Record::tombstone`] (every field empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Found {
    /// The record held by the slot.
    pub record: Record,
    /// Segment the slot was found in.
    pub location: Location,
    /// Index of the slot within its segment.
    pub index: u64,
}

impl Found {
    pub(crate) fn new(slot: Slot, at: SlotRef) -> Self {
        Self {
            record: slot.into_record(),
            location: at.location,
            index: at.index,
        }
    }

    /// Returns the slot address.
    #[must_use]
    pub const fn slot(&self) -> SlotRef {
        SlotRef::new(self.location, self.index)
    }

    /// Returns whether the found slot was deleted.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        self.record.is_tombstone()
    }
}

/// An import row that was not written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// The rejected row.
    pub record: Record,
    /// Why it was rejected.
    pub error: CodecError,
}

/// Outcome of creating a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSummary {
    /// Rows written to the sorted segment.
    pub imported: u64,
    /// Rows rejected by the codec, in source order.
    pub skipped: Vec<SkippedRow>,
}
