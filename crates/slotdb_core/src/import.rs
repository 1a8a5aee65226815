//! Import source reader.
//!
//! The source is a delimited text file with one `id,state,city,name` row per
//! line. Fields may be quoted with `"` (embedded quotes doubled). Blank lines
//! are skipped. Rows are expected to be sorted by numeric key already.

use crate::error::{CoreError, CoreResult};
use slotdb_codec::{split_fields, Record};
use std::io::BufRead;

/// Streams records out of an import source.
#[derive(Debug)]
pub struct SourceReader<R> {
    reader: R,
    line_number: usize,
    underscores_as_spaces: bool,
    buf: String,
}

impl<R: BufRead> SourceReader<R> {
    /// Creates a reader over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            underscores_as_spaces: false,
            buf: String::new(),
        }
    }

    /// Sets whether `_` is rewritten to a space before each row is parsed.
    #[must_use]
    pub fn underscores_as_spaces(mut self, value: bool) -> Self {
        self.underscores_as_spaces = value;
        self
    }

    fn parse_row(&self, line: &str) -> CoreResult<Record> {
        let line = if self.underscores_as_spaces {
            line.replace('_', " ")
        } else {
            line.to_string()
        };

        let fields = split_fields(&line).map_err(|err| CoreError::InvalidSource {
            line: self.line_number,
            message: err.to_string(),
        })?;

        match <[String; 4]>::try_from(fields) {
            Ok([id, state, city, name]) => Ok(Record {
                id,
                state,
                city,
                name,
            }),
            Err(fields) => Err(CoreError::InvalidSource {
                line: self.line_number,
                message: format!("expected 4 fields, found {}", fields.len()),
            }),
        }
    }
}

impl<R: BufRead> Iterator for SourceReader<R> {
    type Item = CoreResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(err.into())),
            }
            self.line_number += 1;

            let line = self.buf.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                continue;
            }
            return Some(self.parse_row(line));
        }
    }
}
