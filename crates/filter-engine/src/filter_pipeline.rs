//! The FilterPipeline holds the active filters and runs them over inputs.
//!
//! Filters are registered first, then `process` streams an input through
//! the conjunction of all of them. `process` borrows the pipeline
//! immutably, so the filter set is fixed for the duration of a run.

use crate::error::{EngineError, Result};
use crate::report::{MalformedPolicy, ProcessReport};
use crate::spec::FilterSpec;
use crate::traits::Filter;
use rayon::prelude::*;
use record_loader::{Record, RecordReader};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Ordered collection of active filters.
///
/// ## Usage
/// ```ignore
/// let mut pipeline = FilterPipeline::new();
/// pipeline
///     .use_filter("breeding", &[] as &[&str])?
///     .use_filter("date", &["2019-01-01", "2020-12-31"])?;
///
/// let report = pipeline.process(Path::new("observations.txt"), &mut std::io::stdout())?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
    specs: Vec<FilterSpec>,
    policy: MalformedPolicy,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            specs: Vec::new(),
            policy: MalformedPolicy::default(),
        }
    }

    /// Set how malformed records are handled (builder pattern).
    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Add a custom filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Register a filter by name with string parameters.
    ///
    /// Nothing is registered if the name or parameters are rejected.
    pub fn use_filter<S: AsRef<str>>(&mut self, name: &str, params: &[S]) -> Result<&mut Self> {
        let spec = FilterSpec::parse(name, params)?;
        self.register(spec)
    }

    /// Register a typed filter specification.
    pub fn register(&mut self, spec: FilterSpec) -> Result<&mut Self> {
        let filter = spec.build()?;
        tracing::debug!("Registered filter: {}", spec);
        self.filters.push(filter);
        self.specs.push(spec);
        Ok(self)
    }

    /// Specifications registered through `use_filter` or `register`.
    pub fn specs(&self) -> &[FilterSpec] {
        &self.specs
    }

    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn policy(&self) -> MalformedPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// True if every filter keeps the record. An empty pipeline keeps all.
    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Filter the file at `path` into `sink`.
    ///
    /// The header line is written first, followed by every matching record in
    /// input order. Nothing is written if the input cannot be opened.
    ///
    /// # Returns
    /// * `Ok(ProcessReport)` - counts for the run
    /// * `Err(InputNotFound)` - `path` could not be opened
    /// * `Err(MalformedRecord)` - a bad line under `MalformedPolicy::Abort`
    /// * `Err(Input | Io)` - unusable header or a read/write failure
    pub fn process<W: Write>(&self, path: &Path, sink: &mut W) -> Result<ProcessReport> {
        let records = RecordReader::open(path)?;
        tracing::debug!(
            "Processing {} with {} filter(s): {:?}",
            path.display(),
            self.len(),
            self.filter_names()
        );
        let report = self.run(records, sink)?;
        tracing::info!("Processed {}: {}", path.display(), report);
        Ok(report)
    }

    /// Filter an already-open input into `sink`.
    pub fn process_reader<R: BufRead, W: Write>(&self, reader: R, sink: &mut W) -> Result<ProcessReport> {
        let records = RecordReader::new(reader)?;
        self.run(records, sink)
    }

    /// Filter several independent inputs in parallel.
    ///
    /// Each job writes only to its own sink. Results are returned in job
    /// order; one failing job does not stop the others.
    pub fn process_batch<W: Write + Send>(
        &self,
        jobs: &mut [(PathBuf, W)],
    ) -> Vec<Result<ProcessReport>> {
        jobs.par_iter_mut()
            .map(|(path, sink)| self.process(path, sink))
            .collect()
    }

    fn run<R: BufRead, W: Write>(&self, records: RecordReader<R>, sink: &mut W) -> Result<ProcessReport> {
        let mut report = ProcessReport::default();
        writeln!(sink, "{}", records.header())?;

        for item in records {
            let record = match item {
                Ok(record) => record,
                Err(e) if e.is_malformed_record() => {
                    report.records_read += 1;
                    match self.policy {
                        MalformedPolicy::Skip => {
                            tracing::warn!("Skipping malformed record: {}", e);
                            report.records_skipped += 1;
                            continue;
                        }
                        MalformedPolicy::Abort => return Err(EngineError::MalformedRecord(e)),
                    }
                }
                Err(e) => return Err(e.into()),
            };

            report.records_read += 1;
            if self.matches(&record) {
                writeln!(sink, "{}", record.raw)?;
                report.records_emitted += 1;
            }
        }

        sink.flush()?;
        if report.records_skipped > 0 {
            tracing::warn!("{} malformed record(s) skipped", report.records_skipped);
        }
        Ok(report)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPipeline")
            .field("filters", &self.filter_names())
            .field("policy", &self.policy)
            .finish()
    }
}
