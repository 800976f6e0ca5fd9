//! Filter for an observation date window.

use crate::error::{EngineError, Result};
use crate::traits::Filter;
use chrono::NaiveDate;
use record_loader::Record;

/// Keeps records observed within `[start, end]`.
///
/// Both bounds are inclusive, so `start == end` selects a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFilter {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateFilter {
    /// Create a new DateFilter.
    ///
    /// Fails with `InvalidParameters` when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(EngineError::invalid(
                "date",
                format!("start {} is after end {}", start, end),
            ));
        }
        Ok(Self { start, end })
    }
}

impl Filter for DateFilter {
    fn name(&self) -> &str {
        "date"
    }

    fn matches(&self, record: &Record) -> bool {
        (self.start..=self.end).contains(&record.observation_date)
    }
}
