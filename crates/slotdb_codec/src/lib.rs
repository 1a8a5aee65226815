//! # SlotDB Codec
//!
//! Fixed-width record line encoding/decoding for SlotDB.
//!
//! Every record occupies exactly one slot of `width` bytes:
//!
//! ```text
//! 5,"NY","NYC","Bob"<spaces...>\n     live record
//! 1,,,<spaces...>\n                   tombstone (key kept, fields blank)
//! ```
//!
//! Because all slots share one width, slot `i` starts at byte `i * width`.
//!
//! ## Usage
//!
//! ```
//! use slotdb_codec::{Record, RecordCodec, Slot};
//!
//! let codec = RecordCodec::new(40).unwrap();
//! let record = Record::new("5", "NY", "NYC", "Bob");
//!
//! let line = codec.encode(&record).unwrap();
//! assert_eq!(line.len(), 40);
//!
//! let decoded = codec.decode(&line).unwrap();
//! assert_eq!(decoded, Slot::Live(record));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod encoder;
mod error;
mod record;

pub use decoder::{decode_slot, split_fields};
pub use encoder::{encode_record, encode_tombstone};
pub use error::{CodecError, CodecResult};
pub use record::{Record, Slot};

/// Slot width used when none is configured.
pub const DEFAULT_RECORD_WIDTH: usize = 200;

/// Smallest usable slot width: one content byte plus the terminator.
pub const MIN_RECORD_WIDTH: usize = 2;

/// Largest accepted slot width (1 MiB).
pub const MAX_RECORD_WIDTH: usize = 1 << 20;

const DELIMITER: char = ',';
const QUOTE: char = '"';
const TERMINATOR: char = '\n';
const PAD: char = ' ';

/// Encoder/decoder bound to one slot width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCodec {
    width: usize,
}

impl RecordCodec {
    /// Creates a codec for slots of `width` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidWidth`] if `width` is outside
    /// `MIN_RECORD_WIDTH..=MAX_RECORD_WIDTH`.
    pub fn new(width: usize) -> CodecResult<Self> {
        encoder::check_width(width)?;
        Ok(Self { width })
    }

    /// Returns the slot width in bytes.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Encodes a live record into one slot.
    ///
    /// # Errors
    ///
    /// See [`encode_record`].
    pub fn encode(&self, record: &Record) -> CodecResult<Vec<u8>> {
        encode_record(record, self.width)
    }

    /// Encodes a tombstone for `key` into one slot.
    ///
    /// # Errors
    ///
    /// See [`encode_tombstone`].
    pub fn encode_tombstone(&self, key: &str) -> CodecResult<Vec<u8>> {
        encode_tombstone(key, self.width)
    }

    /// Decodes one slot.
    ///
    /// # Errors
    ///
    /// See [`decode_slot`].
    pub fn decode(&self, line: &[u8]) -> CodecResult<Slot> {
        decode_slot(line)
    }
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self {
            width: DEFAULT_RECORD_WIDTH,
        }
    }
}
