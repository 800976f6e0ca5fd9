//! # Record Loader Crate
//!
//! This crate reads bird-observation records from tab-separated files.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Record, BreedingStatus, BreedingCategory, Schema)
//! - **parser**: Parse the header and data lines into Rust structs
//! - **reader**: Lazy, single-pass iteration over an input
//! - **error**: Error types for record loading
//!
//! ## Input Format
//!
//! The first non-empty line is a header. It must name a date column
//! (`OBSERVATION DATE` or `DATE`) and a breeding column (`BREEDING CODE`,
//! `BREEDING BIRD ATLAS CODE` or `BREEDING`); other columns are carried
//! through untouched. Dates are `YYYY-MM-DD`. Breeding cells are empty, a
//! boolean (`true`/`false`/`yes`/`no`/`1`/`0`) or an eBird atlas code.
//!
//! ## Example Usage
//!
//! ```ignore
//! use record_loader::RecordReader;
//! use std::path::Path;
//!
//! let reader = RecordReader::open(Path::new("observations.txt"))?;
//! for record in reader {
//!     let record = record?;
//!     println!("{} {}", record.observation_date, record.breeding.is_evidence());
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod reader;

// Re-export commonly used types for convenience
pub use error::{RecordError, Result};
pub use reader::RecordReader;
pub use types::{
    BreedingCategory,
    BreedingStatus,
    Record,
    Schema,
};
