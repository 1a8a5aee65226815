//! Fixed-width line encoder.
//!
//! A live record becomes `id,"state","city","name"`: the key is written bare,
//! text fields are always quoted with embedded quotes doubled. A tombstone keeps
//! its key and leaves the text columns bare and empty: `id,,,`. Either line is
//! right-padded with spaces to `width - 1` bytes and terminated by `\n`, so
//! every slot is exactly `width` bytes long.

use crate::error::{CodecError, CodecResult};
use crate::record::Record;
use crate::{DELIMITER, MAX_RECORD_WIDTH, MIN_RECORD_WIDTH, PAD, QUOTE, TERMINATOR};

/// Encodes a live record into a slot line of exactly `width` bytes.
///
/// # Errors
///
/// - [`CodecError::OversizedRecord`] if the line does not fit in `width`
/// - [`CodecError::InvalidKey`] / [`CodecError::InvalidField`] if a value
///   cannot be represented on one line
/// - [`CodecError::InvalidWidth`] if `width` is out of range
pub fn encode_record(record: &Record, width: usize) -> CodecResult<Vec<u8>> {
    check_width(width)?;
    validate_key(&record.id)?;
    if record.id.is_empty() {
        return Err(CodecError::invalid_key("", "live records need a key"));
    }
    validate_field("state", &record.state)?;
    validate_field("city", &record.city)?;
    validate_field("name", &record.name)?;

    let mut line = String::with_capacity(width);
    line.push_str(&record.id);
    for value in [&record.state, &record.city, &record.name] {
        line.push(DELIMITER);
        push_quoted(&mut line, value);
    }

    pad_line(line, width).map_err(|encoded_len| CodecError::OversizedRecord {
        width,
        encoded_len,
        id: record.id.clone(),
        state: record.state.clone(),
        city: record.city.clone(),
        name: record.name.clone(),
    })
}

/// Encodes a tombstone for `key` into a slot line of exactly `width` bytes.
///
/// # Errors
///
/// Same conditions as [`encode_record`]; an empty key is allowed.
pub fn encode_tombstone(key: &str, width: usize) -> CodecResult<Vec<u8>> {
    check_width(width)?;
    validate_key(key)?;

    let mut line = String::with_capacity(width);
    line.push_str(key);
    for _ in 0..3 {
        line.push(DELIMITER);
    }

    pad_line(line, width).map_err(|encoded_len| CodecError::OversizedRecord {
        width,
        encoded_len,
        id: key.to_string(),
        state: String::new(),
        city: String::new(),
        name: String::new(),
    })
}

pub(crate) fn check_width(width: usize) -> CodecResult<()> {
    if !(MIN_RECORD_WIDTH..=MAX_RECORD_WIDTH).contains(&width) {
        return Err(CodecError::InvalidWidth {
            width,
            min: MIN_RECORD_WIDTH,
            max: MAX_RECORD_WIDTH,
        });
    }
    Ok(())
}

fn validate_key(key: &str) -> CodecResult<()> {
    if let Some(c) = key
        .chars()
        .find(|&c| c == DELIMITER || c == QUOTE || c == '\n' || c == '\r')
    {
        return Err(CodecError::invalid_key(
            key,
            format!("key may not contain {c:?}"),
        ));
    }
    Ok(())
}

fn validate_field(field: &'static str, value: &str) -> CodecResult<()> {
    if value.contains(['\n', '\r']) {
        return Err(CodecError::invalid_field(field, "line breaks are not allowed"));
    }
    Ok(())
}

fn push_quoted(line: &mut String, value: &str) {
    line.push(QUOTE);
    for c in value.chars() {
        if c == QUOTE {
            line.push(QUOTE);
        }
        line.push(c);
    }
    line.push(QUOTE);
}

/// Pads `line` to `width - 1` bytes and appends the terminator.
///
/// On overflow returns the length the line would have needed.
fn pad_line(mut line: String, width: usize) -> Result<Vec<u8>, usize> {
    let content_width = width - 1;
    if line.len() > content_width {
        return Err(line.len() + 1);
    }

    line.extend(std::iter::repeat(PAD).take(content_width - line.len()));
    line.push(TERMINATOR);
    Ok(line.into_bytes())
}
