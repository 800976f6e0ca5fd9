//! Filter implementations for the record pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod breeding;
pub mod date;

// Re-export for convenience
pub use breeding::BreedingFilter;
pub use date::DateFilter;
