//! Slot line decoder.
//!
//! A deleted slot is recognized by bare empty text columns (`7,,,`). A line
//! with quoted empty columns (`7,"","",""`) is a live record with empty
//! fields, so stores that marked deletes that way read them back as live.

use crate::error::{CodecError, CodecResult};
use crate::record::{Record, Slot};
use crate::{DELIMITER, PAD, QUOTE, TERMINATOR};

/// One parsed column of a delimited line.
#[derive(Debug, PartialEq, Eq)]
enum Field {
    Quoted(String),
    Bare(String),
}

impl Field {
    fn into_value(self) -> String {
        match self {
            Self::Quoted(value) | Self::Bare(value) => value,
        }
    }

    fn is_bare_empty(&self) -> bool {
        matches!(self, Self::Bare(value) if value.is_empty())
    }
}

/// Decodes the raw bytes of one slot.
///
/// The terminator and the space padding are stripped first. A blank slot, a
/// slot with an empty key, and a slot whose three text columns are bare and
/// empty all decode as [`Slot::Tombstone`].
///
/// # Errors
///
/// - [`CodecError::InvalidUtf8`] if the bytes are not UTF-8
/// - [`CodecError::Malformed`] if the line is not four delimited fields
pub fn decode_slot(bytes: &[u8]) -> CodecResult<Slot> {
    let text = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
    let line = text.strip_suffix(TERMINATOR).unwrap_or(text);
    let line = line.strip_suffix('\r').unwrap_or(line);
    let line = line.trim_end_matches(PAD);

    if line.is_empty() {
        return Ok(Slot::Tombstone { key: String::new() });
    }

    let fields = split(line)?;
    let Ok([key, state, city, name]) = <[Field; 4]>::try_from(fields) else {
        return Err(CodecError::malformed("expected 4 fields"));
    };
    let key = key.into_value();

    let tombstone = [&state, &city, &name].iter().all(|f| f.is_bare_empty());
    if tombstone || key.is_empty() {
        return Ok(Slot::Tombstone { key });
    }

    Ok(Slot::Live(Record {
        id: key,
        state: state.into_value(),
        city: city.into_value(),
        name: name.into_value(),
    }))
}

/// Splits one delimited line into its field values.
///
/// Fields may be bare or wrapped in quotes with embedded quotes doubled.
/// The line must not include its terminator.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] on an unterminated quoted field, a stray
/// quote inside a bare field, or content directly after a closing quote.
pub fn split_fields(line: &str) -> CodecResult<Vec<String>> {
    Ok(split(line)?.into_iter().map(Field::into_value).collect())
}

fn split(line: &str) -> CodecResult<Vec<Field>> {
    let mut fields = Vec::new();
    let mut rest = line;

    loop {
        let (field, remainder) = match rest.strip_prefix(QUOTE) {
            Some(quoted) => parse_quoted(quoted)?,
            None => {
                let end = rest.find(DELIMITER).unwrap_or(rest.len());
                let value = &rest[..end];
                if value.contains(QUOTE) {
                    return Err(CodecError::malformed(format!(
                        "stray quote in unquoted field {value:?}"
                    )));
                }
                (Field::Bare(value.to_string()), &rest[end..])
            }
        };
        fields.push(field);

        if remainder.is_empty() {
            return Ok(fields);
        }
        match remainder.strip_prefix(DELIMITER) {
            Some(next) => rest = next,
            None => {
                return Err(CodecError::malformed(format!(
                    "unexpected content after quoted field: {remainder:?}"
                )))
            }
        }
    }
}

/// Parses a quoted field whose opening quote is already consumed.
fn parse_quoted(input: &str) -> CodecResult<(Field, &str)> {
    let mut value = String::new();
    let mut chars = input.char_indices();

    while let Some((i, c)) = chars.next() {
        if c != QUOTE {
            value.push(c);
            continue;
        }
        if input[i + 1..].starts_with(QUOTE) {
            value.push(QUOTE);
            chars.next();
            continue;
        }
        return Ok((Field::Quoted(value), &input[i + 1..]));
    }

    Err(CodecError::malformed("unterminated quoted field"))
}
