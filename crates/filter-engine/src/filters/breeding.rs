//! Filter to keep only records with breeding evidence.

use crate::traits::Filter;
use record_loader::Record;

/// Keeps records whose breeding column shows breeding evidence.
///
/// A record qualifies when the column holds a true flag or an atlas code in
/// the possible, probable or confirmed category. Flyovers (`F`) and empty
/// cells do not qualify.
pub struct BreedingFilter;

impl Filter for BreedingFilter {
    fn name(&self) -> &str {
        "breeding"
    }

    fn matches(&self, record: &Record) -> bool {
        record.breeding.is_evidence()
    }
}
