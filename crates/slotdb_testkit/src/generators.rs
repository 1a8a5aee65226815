//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random test data
//! that maintains required invariants.

use proptest::prelude::*;
use slotdb_codec::Record;

/// Strategy for text fields that fit on one line, quotes and commas included.
pub fn text_field_strategy(max_len: usize) -> impl Strategy<Value = String> {
    prop::string::string_regex(&format!("[ a-zA-Z0-9,\"'._-]{{0,{max_len}}}"))
        .expect("Invalid regex")
}

/// Strategy for a record with the given key.
pub fn record_with_key(key: i64) -> impl Strategy<Value = Record> {
    (
        text_field_strategy(12),
        text_field_strategy(20),
        text_field_strategy(24),
    )
        .prop_map(move |(state, city, name)| Record::new(key.to_string(), state, city, name))
}

/// Strategy for any record with a non-negative key.
pub fn record_strategy() -> impl Strategy<Value = Record> {
    (0i64..1_000_000).prop_flat_map(record_with_key)
}

/// Strategy for import rows with unique keys in ascending order.
pub fn sorted_rows_strategy(max_rows: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::btree_set(0i64..10_000, 0..max_rows)
        .prop_flat_map(|keys| {
            keys.into_iter()
                .map(record_with_key)
                .collect::<Vec<_>>()
        })
}

/// One store operation.
#[derive(Debug, Clone)]
pub enum StoreOperation {
    /// Append a record to the overflow segment.
    Add(Record),
    /// Rewrite the record with the same key.
    Update(Record),
    /// Blank the record with this key.
    Delete(i64),
    /// Look the key up.
    Find(i64),
}

/// Strategy for store operations over keys in `0..key_space`.
pub fn store_operation_strategy(key_space: i64) -> impl Strategy<Value = StoreOperation> {
    let key = 0..key_space;
    prop_oneof![
        2 => key.clone().prop_flat_map(record_with_key).prop_map(StoreOperation::Add),
        2 => key.clone().prop_flat_map(record_with_key).prop_map(StoreOperation::Update),
        1 => key.clone().prop_map(StoreOperation::Delete),
        3 => key.prop_map(StoreOperation::Find),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    key_space: i64,
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOperation>> {
    prop::collection::vec(store_operation_strategy(key_space), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotdb_codec::{RecordCodec, DEFAULT_RECORD_WIDTH};

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn generated_records_fit_default_width(record in record_strategy()) {
            let codec = RecordCodec::new(DEFAULT_RECORD_WIDTH).unwrap();
            prop_assert!(codec.encode(&record).is_ok());
        }

        #[test]
        fn sorted_rows_are_ascending(rows in sorted_rows_strategy(20)) {
            let keys: Vec<i64> = rows.iter().map(|r| r.id.parse().unwrap()).collect();
            prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
