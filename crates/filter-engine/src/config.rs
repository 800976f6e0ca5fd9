//! JSON filter configuration files.
//!
//! A configuration file is a JSON array of filter specifications:
//!
//! ```json
//! [
//!   { "kind": "breeding" },
//!   { "kind": "date", "start": "2019-01-01", "end": "2020-12-31" }
//! ]
//! ```

use crate::error::{EngineError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::spec::FilterSpec;
use std::fs;
use std::path::Path;

/// Read and validate the filter list stored at `path`.
pub fn load_filter_config(path: &Path) -> Result<Vec<FilterSpec>> {
    let content = fs::read_to_string(path).map_err(|source| EngineError::InputNotFound {
        path: path.display().to_string(),
        source,
    })?;
    let specs: Vec<FilterSpec> =
        serde_json::from_str(&content).map_err(|source| EngineError::Config {
            path: path.display().to_string(),
            source,
        })?;
    for spec in &specs {
        spec.validate()?;
    }
    tracing::debug!("Loaded {} filter(s) from {}", specs.len(), path.display());
    Ok(specs)
}

impl FilterPipeline {
    /// Build a pipeline from a list of specifications.
    pub fn from_specs(specs: impl IntoIterator<Item = FilterSpec>) -> Result<Self> {
        let mut pipeline = FilterPipeline::new();
        for spec in specs {
            pipeline.register(spec)?;
        }
        Ok(pipeline)
    }
}
