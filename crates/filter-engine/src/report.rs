//! Run outcome and malformed-record policy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do when a record cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MalformedPolicy {
    /// Log the record, count it, and keep going
    #[default]
    Skip,
    /// Stop the run with `EngineError::MalformedRecord`
    Abort,
}

/// Counts gathered over one `process` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Data lines read, including skipped ones
    pub records_read: usize,
    /// Records that passed every filter and were written
    pub records_emitted: usize,
    /// Malformed records skipped
    pub records_skipped: usize,
}

impl ProcessReport {
    /// Combine the counts of two runs.
    pub fn merge(self, other: ProcessReport) -> ProcessReport {
        ProcessReport {
            records_read: self.records_read + other.records_read,
            records_emitted: self.records_emitted + other.records_emitted,
            records_skipped: self.records_skipped + other.records_skipped,
        }
    }
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} read, {} emitted, {} skipped",
            self.records_read, self.records_emitted, self.records_skipped
        )
    }
}
