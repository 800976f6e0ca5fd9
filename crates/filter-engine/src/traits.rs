//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible predicates to be applied to a record stream.

use record_loader::Record;

/// Core trait for filtering records.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows a pipeline to be shared across batch workers
/// - Filters see one record at a time and never consume it, so the
///   pipeline can stream inputs without collecting them first
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Returns true if the record should be kept.
    fn matches(&self, record: &Record) -> bool;
}
