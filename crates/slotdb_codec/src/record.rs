//! Logical record and decoded slot types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical record: a key plus three free-text fields.
///
/// The key is kept as text, exactly as it is stored on disk. An empty key
/// marks a tombstone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record key, an integer written as text.
    pub id: String,
    /// State field.
    pub state: String,
    /// City field.
    pub city: String,
    /// Person name field.
    pub name: String,
}

impl Record {
    /// Creates a record from its four fields.
    pub fn new(
        id: impl Into<String>,
        state: impl Into<String>,
        city: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            state: state.into(),
            city: city.into(),
            name: name.into(),
        }
    }

    /// Returns the all-empty record a deleted slot yields.
    #[must_use]
    pub fn tombstone() -> Self {
        Self::default()
    }

    /// Returns whether this record stands for a deleted slot.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        self.id.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}\tstate: {}\tcity: {}\tname: {}",
            self.id, self.state, self.city, self.name
        )
    }
}

/// The decoded content of one fixed-width slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A live record.
    Live(Record),
    /// A deleted record. The key is retained so sorted order survives deletion;
    /// it is empty for a fully blank slot.
    Tombstone {
        /// Key the slot held before deletion.
        key: String,
    },
}

impl Slot {
    /// Returns the key stored in the slot, live or deleted.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Live(record) => &record.id,
            Self::Tombstone { key } => key,
        }
    }

    /// Returns whether the slot holds a deleted record.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone { .. })
    }

    /// Converts the slot into the record callers see.
    ///
    /// Tombstones become [`Record::tombstone`].
    #[must_use]
    pub fn into_record(self) -> Record {
        match self {
            Self::Live(record) => record,
            Self::Tombstone { .. } => Record::tombstone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tombstone_record_has_empty_fields() {
        let record = Record::tombstone();
        assert!(record.is_tombstone());
        assert_eq!(record, Record::new("", "", "", ""));
    }

    #[test]
    fn display_matches_report_layout() {
        let record = Record::new("5", "NY", "NYC", "Bob");
        assert_eq!(
            record.to_string(),
            "ID: 5\tstate: NY\tcity: NYC\tname: Bob"
        );
    }

    #[test]
    fn slot_key_survives_tombstone() {
        let slot = Slot::Tombstone {
            key: "12".to_string(),
        };
        assert_eq!(slot.key(), "12");
        assert!(slot.is_tombstone());
        assert!(slot.into_record().is_tombstone());
    }

    #[test]
    fn live_slot_into_record() {
        let record = Record::new("1", "CA", "LA", "Alice");
        let slot = Slot::Live(record.clone());
        assert!(!slot.is_tombstone());
        assert_eq!(slot.into_record(), record);
    }

    #[test]
    fn record_serializes_with_field_names() {
        let record = Record::new("9", "TX", "Austin", "Carl");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"id":"9","state":"TX","city":"Austin","name":"Carl"}"#
        );
    }
}
