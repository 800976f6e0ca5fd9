//! Error types for the record-loader crate.
//!
//! Errors fall into two groups:
//! - whole-input failures (missing file, missing header, I/O) that end a run
//! - per-line failures that callers may skip and count

use thiserror::Error;

/// Errors that can occur while opening and reading observation records
#[derive(Error, Debug)]
pub enum RecordError {
    /// Input path could not be opened for reading
    #[error("Input not found: {path}")]
    InputNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O error occurred while reading the input
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Input had no header line
    #[error("Input has no header line")]
    MissingHeader,

    /// Header line lacks a column the reader needs
    #[error("Header is missing the {column} column")]
    MissingColumn { column: String },

    /// Line in the input couldn't be parsed
    #[error("Parse error at line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    /// Line ended before a required column
    #[error("Expected at least {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// A field had an invalid value
    #[error("Invalid value for {field} at line {line}: {value:?}")]
    InvalidValue {
        line: usize,
        field: String,
        value: String,
    },
}

impl RecordError {
    /// True for failures scoped to a single record.
    pub fn is_malformed_record(&self) -> bool {
        matches!(
            self,
            RecordError::ParseError { .. }
                | RecordError::FieldCountMismatch { .. }
                | RecordError::InvalidValue { .. }
        )
    }

    /// Line number for per-record failures.
    pub fn line(&self) -> Option<usize> {
        match self {
            RecordError::ParseError { line, .. }
            | RecordError::FieldCountMismatch { line, .. }
            | RecordError::InvalidValue { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecordError>;
