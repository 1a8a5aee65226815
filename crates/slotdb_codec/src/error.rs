//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The encoded line does not fit in a slot.
    ///
    /// Carries every field value so the caller can report the rejected record.
    #[error(
        "record too long for width {width} ({encoded_len} bytes): \
         id: {id:?}, state: {state:?}, city: {city:?}, name: {name:?}"
    )]
    OversizedRecord {
        /// Configured slot width in bytes.
        width: usize,
        /// Length the line would need, including the terminator.
        encoded_len: usize,
        /// Rejected key.
        id: String,
        /// Rejected state.
        state: String,
        /// Rejected city.
        city: String,
        /// Rejected name.
        name: String,
    },

    /// Slot width outside the accepted range.
    #[error("invalid record width {width}: must be between {min} and {max}")]
    InvalidWidth {
        /// Requested width.
        width: usize,
        /// Smallest accepted width.
        min: usize,
        /// Largest accepted width.
        max: usize,
    },

    /// Key cannot be represented in the unquoted key column.
    #[error("invalid key {key:?}: {message}")]
    InvalidKey {
        /// The offending key.
        key: String,
        /// Why it was rejected.
        message: String,
    },

    /// Text field cannot be stored on a single line.
    #[error("invalid {field} field: {message}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Why it was rejected.
        message: String,
    },

    /// Slot content does not parse as a record line.
    #[error("malformed record line: {message}")]
    Malformed {
        /// Description of the parse failure.
        message: String,
    },

    /// Slot content is not valid UTF-8.
    #[error("invalid UTF-8 in record line")]
    InvalidUtf8,
}

impl CodecError {
    /// Create an invalid key error.
    pub fn invalid_key(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Create a malformed line error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}
