//! Store descriptor: the metadata needed to reopen a store.
//!
//! ```text
//! <record_width>\n
//! <sorted_count>\n
//! <overflow_count>\n
//! ```

use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use slotdb_codec::{MAX_RECORD_WIDTH, MIN_RECORD_WIDTH};

/// Slot width and segment counts of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// Width of every slot in both segments, in bytes.
    pub record_width: usize,
    /// Number of slots in the sorted segment, tombstones included.
    pub sorted_count: u64,
    /// Number of slots in the overflow segment, tombstones included.
    pub overflow_count: u64,
}

impl Descriptor {
    /// Creates a descriptor for an empty store.
    #[must_use]
    pub const fn new(record_width: usize) -> Self {
        Self {
            record_width,
            sorted_count: 0,
            overflow_count: 0,
        }
    }

    /// Encodes the descriptor as three decimal lines.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{}\n{}\n{}\n",
            self.record_width, self.sorted_count, self.overflow_count
        )
    }

    /// Decodes a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDescriptor`] if a line is missing, extra or
    /// not a non-negative integer, if the width is out of range, or if a
    /// segment of `count * width` bytes could not be addressed.
    pub fn decode(text: &str) -> CoreResult<Self> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

        let record_width: usize = parse_line(lines.next(), "record width")?;
        let sorted_count: u64 = parse_line(lines.next(), "sorted count")?;
        let overflow_count: u64 = parse_line(lines.next(), "overflow count")?;

        if let Some(extra) = lines.next() {
            return Err(CoreError::invalid_descriptor(format!(
                "unexpected extra line {extra:?}"
            )));
        }
        if !(MIN_RECORD_WIDTH..=MAX_RECORD_WIDTH).contains(&record_width) {
            return Err(CoreError::invalid_descriptor(format!(
                "record width {record_width} is outside {MIN_RECORD_WIDTH}..={MAX_RECORD_WIDTH}"
            )));
        }
        for (what, count) in [("sorted", sorted_count), ("overflow", overflow_count)] {
            if count.checked_mul(record_width as u64).is_none() {
                return Err(CoreError::invalid_descriptor(format!(
                    "{what} count {count} overflows a segment of {record_width}-byte slots"
                )));
            }
        }

        Ok(Self {
            record_width,
            sorted_count,
            overflow_count,
        })
    }
}

fn parse_line<T: std::str::FromStr>(line: Option<&str>, what: &str) -> CoreResult<T> {
    let line = line.ok_or_else(|| CoreError::invalid_descriptor(format!("missing {what}")))?;
    line.parse()
        .map_err(|_| CoreError::invalid_descriptor(format!("{what} is not a number: {line:?}")))
}
