//! Error types for the filter engine.
//!
//! Configuration errors (unknown filter, bad parameters, bad config file)
//! are raised before any input is read. Input errors are raised while
//! processing.

use record_loader::RecordError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Registration named a filter kind the engine does not implement
    #[error("Unknown filter kind: {0:?}")]
    UnknownFilterKind(String),

    /// Registration parameters failed arity, type or range checks
    #[error("Invalid parameters for filter '{filter}': {reason}")]
    InvalidParameters { filter: String, reason: String },

    /// Input path could not be opened
    #[error("Input not found: {path}")]
    InputNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A record failed to parse and the policy is to abort
    #[error("Malformed record: {0}")]
    MalformedRecord(RecordError),

    /// The input as a whole is unusable (no header, missing column)
    #[error("Invalid input: {0}")]
    Input(RecordError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Filter configuration file is not valid JSON for a filter list
    #[error("Invalid filter configuration in {path}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl EngineError {
    pub(crate) fn invalid(filter: &str, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameters {
            filter: filter.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by filter configuration rather than input data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            EngineError::UnknownFilterKind(_)
                | EngineError::InvalidParameters { .. }
                | EngineError::Config { .. }
        )
    }
}

impl From<RecordError> for EngineError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::InputNotFound { path, source } => EngineError::InputNotFound { path, source },
            RecordError::Io(e) => EngineError::Io(e),
            e if e.is_malformed_record() => EngineError::MalformedRecord(e),
            e => EngineError::Input(e),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;
