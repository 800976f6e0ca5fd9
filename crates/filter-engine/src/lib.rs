//! Filter engine for bird-observation records.
//!
//! This crate provides:
//! - Filter trait and the `breeding` and `date` implementations
//! - FilterSpec, the typed form of a filter registration
//! - FilterPipeline for registering filters and streaming inputs through them
//! - JSON filter configuration loading
//!
//! ## Architecture
//! A run has two phases:
//! 1. Registration: filters are added to a FilterPipeline, each one
//!    validated as it is added (unknown kinds and bad parameters fail here,
//!    before any input is touched)
//! 2. Processing: `process` reads the input one record at a time and writes
//!    each record that passes every filter to the sink, in input order
//!
//! ## Example Usage
//! ```ignore
//! use filter_engine::FilterPipeline;
//! use std::path::Path;
//!
//! let mut pipeline = FilterPipeline::new();
//! pipeline.use_filter("breeding", &[] as &[&str])?;
//! pipeline.use_filter("date", &["2019-01-01", "2020-12-31"])?;
//!
//! let report = pipeline.process(Path::new("observations.txt"), &mut std::io::stdout())?;
//! eprintln!("{}", report);
//! ```

pub mod config;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod report;
pub mod spec;
pub mod traits;

// Re-export main types
pub use config::load_filter_config;
pub use error::{EngineError, Result};
pub use filter_pipeline::FilterPipeline;
pub use report::{MalformedPolicy, ProcessReport};
pub use spec::FilterSpec;
pub use traits::Filter;
