//! Streaming record reader.
//!
//! `RecordReader` reads the header eagerly and then yields one record per
//! data line. It never buffers more than the current line, so inputs of any
//! size are processed in constant memory.

use crate::error::{RecordError, Result};
use crate::parser;
use crate::types::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Single-pass iterator over the records of a tab-separated input.
///
/// Per-line failures are yielded as `Err` items and iteration continues;
/// an I/O failure is yielded once and ends iteration.
pub struct RecordReader<R> {
    reader: R,
    schema: Schema,
    header: String,
    line_no: usize,
    buf: Vec<u8>,
    done: bool,
}

impl RecordReader<BufReader<File>> {
    /// Open a file and read its header.
    ///
    /// The file handle is owned by the reader and closed when it is dropped.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| RecordError::InputNotFound {
            path: path.display().to_string(),
            source,
        })?;
        Self::new(BufReader::new(file))
    }
}

impl<R: BufRead> RecordReader<R> {
    /// Wrap a reader, consuming lines up to and including the header.
    pub fn new(reader: R) -> Result<Self> {
        let mut this = Self {
            reader,
            schema: Schema {
                columns: Vec::new(),
                date_index: 0,
                breeding_index: 0,
            },
            header: String::new(),
            line_no: 0,
            buf: Vec::new(),
            done: false,
        };

        let header = loop {
            match this.next_line()? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
                None => return Err(RecordError::MissingHeader),
            }
        };
        this.schema = parser::parse_header(&header)?;
        this.header = parser::trim_line_ending(&header).to_string();
        Ok(this)
    }

    /// The header line as read, without its terminator.
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Read the next raw line, decoding invalid UTF-8 lossily.
    fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.next_line() {
                Ok(Some(line)) => {
                    if parser::trim_line_ending(&line).is_empty() {
                        continue; // Skip empty lines
                    }
                    return Some(parser::parse_record(&self.schema, &line, self.line_no));
                }
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
