//! Fixed-slot segment files.
//!
//! A segment is a flat file of equally sized slots. Slot `i` starts at byte
//! `i * width`, so any record is one seek away. Two segments make up a store:
//! the sorted segment and the overflow segment.
//!
//! Only the first `len()` slots are valid. Bytes beyond them (for example a
//! write at the append position that was never counted) are ignored.

use crate::error::{CoreError, CoreResult};
use slotdb_codec::{Record, RecordCodec, Slot};
use slotdb_storage::StorageBackend;
use std::ops::Range;
use tracing::warn;

/// A file of fixed-width slots with a running count of valid slots.
pub struct Segment {
    /// Storage backend for slot data.
    backend: Box<dyn StorageBackend>,
    /// Line codec bound to the slot width.
    codec: RecordCodec,
    /// Number of valid slots, tombstones included.
    count: u64,
}

impl Segment {
    /// Attaches a segment to a backend that already holds `count` valid slots.
    pub fn new(backend: Box<dyn StorageBackend>, codec: RecordCodec, count: u64) -> Self {
        Self {
            backend,
            codec,
            count,
        }
    }

    /// Returns the number of valid slots.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Returns whether the segment holds no valid slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the slot width in bytes.
    #[must_use]
    pub fn width(&self) -> usize {
        self.codec.width()
    }

    /// Byte offset of slot `index`.
    fn offset(&self, index: u64) -> CoreResult<u64> {
        let width = self.codec.width() as u64;
        index.checked_mul(width).ok_or_else(|| {
            CoreError::corrupted(format!(
                "slot {index} of {width} bytes lies beyond any addressable offset"
            ))
        })
    }

    /// Reads and decodes the slot at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfRange`] if `index >= len()`.
    pub fn read(&self, index: u64) -> CoreResult<Slot> {
        self.check_index(index)?;

        let line = self.backend.read_at(self.offset(index)?, self.codec.width())?;
        Ok(self.codec.decode(&line)?)
    }

    /// Writes `record` at `index`, overwriting whatever the slot held.
    ///
    /// An index past the valid slots is clamped to `len()`, the append
    /// position. This never changes `len()`; use [`Segment::append`] to add a
    /// counted slot. Returns the index actually written.
    ///
    /// # Errors
    ///
    /// Returns a codec error (e.g. an oversized record) without touching the
    /// file.
    pub fn write(&mut self, index: u64, record: &Record) -> CoreResult<u64> {
        let line = self.codec.encode(record)?;

        let index = if index > self.count {
            warn!(
                requested = index,
                clamped = self.count,
                "slot index past end of segment; writing at append position"
            );
            self.count
        } else {
            index
        };

        self.backend.write_at(self.offset(index)?, &line)?;
        Ok(index)
    }

    /// Writes `record` into a new slot at the end and returns its index.
    ///
    /// # Errors
    ///
    /// Returns a codec error without advancing `len()` if the record is rejected.
    pub fn append(&mut self, record: &Record) -> CoreResult<u64> {
        let index = self.write(self.count, record)?;
        self.count += 1;
        Ok(index)
    }

    /// Replaces the record in an existing slot.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfRange`] if `index >= len()`; nothing is written.
    pub fn overwrite(&mut self, index: u64, record: &Record) -> CoreResult<()> {
        self.check_index(index)?;
        self.write(index, record)?;
        Ok(())
    }

    /// Blanks an existing slot, keeping `key` so the slot's position in key
    /// order stays readable.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfRange`] if `index >= len()`; nothing is written.
    pub fn tombstone(&mut self, index: u64, key: &str) -> CoreResult<()> {
        self.check_index(index)?;

        let line = self.codec.encode_tombstone(key)?;
        self.backend.write_at(self.offset(index)?, &line)?;
        Ok(())
    }

    /// Iterates over the slots in `range`, clipped to the valid slots.
    ///
    /// The iterator holds no state beyond the range and can be recreated at will.
    pub fn slots(&self, range: Range<u64>) -> impl Iterator<Item = CoreResult<(u64, Slot)>> + '_ {
        let end = range.end.min(self.count);
        (range.start..end).map(move |index| self.read(index).map(|slot| (index, slot)))
    }

    /// Checks that the backend holds every valid slot.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Corrupted`] if the file is shorter than
    /// `len() * width`, or if that size is not addressable.
    pub fn validate(&self) -> CoreResult<()> {
        let expected = self.offset(self.count)?;
        let size = self.backend.size()?;
        if size < expected {
            return Err(CoreError::corrupted(format!(
                "segment holds {size} bytes but {} slots of {} bytes need {expected}",
                self.count,
                self.codec.width()
            )));
        }
        Ok(())
    }

    /// Flushes pending writes, syncing to disk when `sync` is set.
    pub fn flush(&mut self, sync: bool) -> CoreResult<()> {
        self.backend.flush()?;
        if sync {
            self.backend.sync()?;
        }
        Ok(())
    }

    fn check_index(&self, index: u64) -> CoreResult<()> {
        if index >= self.count {
            return Err(CoreError::OutOfRange {
                index,
                count: self.count,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Segment")
            .field("width", &self.codec.width())
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotdb_codec::CodecError;
    use slotdb_storage::InMemoryBackend;

    const WIDTH: usize = 32;

    fn create_segment() -> Segment {
        Segment::new(
            Box::new(InMemoryBackend::new()),
            RecordCodec::new(WIDTH).unwrap(),
            0,
        )
    }

    fn person(id: u32, name: &str) -> Record {
        Record::new(id.to_string(), "CA", "LA", name)
    }

    #[test]
    fn append_and_read() {
        let mut segment = create_segment();

        assert_eq!(segment.append(&person(1, "Alice")).unwrap(), 0);
        assert_eq!(segment.append(&person(5, "Bob")).unwrap(), 1);
        assert_eq!(segment.len(), 2);

        assert_eq!(segment.read(1).unwrap(), Slot::Live(person(5, "Bob")));
        assert_eq!(segment.read(0).unwrap(), Slot::Live(person(1, "Alice")));
    }

    #[test]
    fn read_out_of_range() {
        let mut segment = create_segment();
        segment.append(&person(1, "Alice")).unwrap();

        assert!(matches!(
            segment.read(1),
            Err(CoreError::OutOfRange { index: 1, count: 1 })
        ));
    }

    #[test]
    fn slots_are_width_aligned() {
        let mut segment = create_segment();
        for i in 0..3 {
            segment.append(&person(i, "X")).unwrap();
        }

        assert_eq!(segment.backend.size().unwrap(), 3 * WIDTH as u64);
    }

    #[test]
    fn oversized_append_leaves_count_and_file_alone() {
        let mut segment = create_segment();
        segment.append(&person(1, "Alice")).unwrap();

        let result = segment.append(&person(2, &"n".repeat(WIDTH)));
        assert!(matches!(
            result,
            Err(CoreError::Codec(CodecError::OversizedRecord { .. }))
        ));
        assert_eq!(segment.len(), 1);
        assert_eq!(segment.backend.size().unwrap(), WIDTH as u64);
    }

    #[test]
    fn overwrite_in_place() {
        let mut segment = create_segment();
        segment.append(&person(1, "Alice")).unwrap();
        segment.append(&person(5, "Bob")).unwrap();

        segment.overwrite(0, &person(1, "Alma")).unwrap();

        assert_eq!(segment.len(), 2);
        assert_eq!(segment.read(0).unwrap(), Slot::Live(person(1, "Alma")));
        assert_eq!(segment.read(1).unwrap(), Slot::Live(person(5, "Bob")));
    }

    #[test]
    fn overwrite_rejects_unallocated_slot() {
        let mut segment = create_segment();
        segment.append(&person(1, "Alice")).unwrap();

        let result = segment.overwrite(1, &person(2, "Zed"));
        assert!(matches!(result, Err(CoreError::OutOfRange { .. })));
        assert_eq!(segment.backend.size().unwrap(), WIDTH as u64);
    }

    #[test]
    fn write_past_end_clamps_to_append_position() {
        let mut segment = create_segment();
        segment.append(&person(1, "Alice")).unwrap();

        let written = segment.write(40, &person(9, "Carl")).unwrap();

        assert_eq!(written, 1);
        assert_eq!(segment.len(), 1);
        assert_eq!(segment.backend.size().unwrap(), 2 * WIDTH as u64);
    }

    #[test]
    fn tombstone_keeps_key_and_count() {
        let mut segment = create_segment();
        segment.append(&person(1, "Alice")).unwrap();

        segment.tombstone(0, "1").unwrap();

        let slot = segment.read(0).unwrap();
        assert_eq!(slot.key(), "1");
        assert!(slot.is_tombstone());
        assert_eq!(segment.len(), 1);
    }

    #[test]
    fn slots_iterates_in_index_order() {
        let mut segment = create_segment();
        for i in 0..4 {
            segment.append(&person(i * 10, "X")).unwrap();
        }

        let keys: Vec<String> = segment
            .slots(1..100)
            .map(|item| item.unwrap().1.key().to_string())
            .collect();
        assert_eq!(keys, vec!["10", "20", "30"]);
    }

    #[test]
    fn validate_detects_short_file() {
        let segment = Segment::new(
            Box::new(InMemoryBackend::with_data(vec![b' '; WIDTH])),
            RecordCodec::new(WIDTH).unwrap(),
            2,
        );

        assert!(matches!(
            segment.validate(),
            Err(CoreError::Corrupted { .. })
        ));
    }

    #[test]
    fn validate_rejects_unaddressable_count() {
        let mut segment = Segment::new(
            Box::new(InMemoryBackend::new()),
            RecordCodec::new(200).unwrap(),
            u64::MAX / 100,
        );

        assert!(matches!(
            segment.validate(),
            Err(CoreError::Corrupted { .. })
        ));
        assert!(matches!(
            segment.tombstone(u64::MAX / 100 - 1, "1"),
            Err(CoreError::Corrupted { .. })
        ));
    }

    #[test]
    fn reattach_existing_slots() {
        let mut first = create_segment();
        first.append(&person(3, "Cy")).unwrap();
        let bytes = first.backend.read_at(0, WIDTH).unwrap();

        let second = Segment::new(
            Box::new(InMemoryBackend::with_data(bytes)),
            RecordCodec::new(WIDTH).unwrap(),
            1,
        );
        second.validate().unwrap();
        assert_eq!(second.read(0).unwrap(), Slot::Live(person(3, "Cy")));
    }
}
