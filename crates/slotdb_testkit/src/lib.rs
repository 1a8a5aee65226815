//! # SlotDB Testkit
//!
//! Test utilities for SlotDB.
//!
//! This crate provides:
//! - Test fixtures: stores created in a temporary directory
//! - Import source writers
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use slotdb_testkit::prelude::*;
//!
//! #[test]
//! fn lookup_after_create() {
//!     let store = TestStore::from_rows(sample_rows());
//!     assert!(store.find("5").unwrap().is_some());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
