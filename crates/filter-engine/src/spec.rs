//! Typed filter specifications.
//!
//! A `FilterSpec` names one recognised filter kind together with its
//! parameters. Specs come from string registrations (`FilterSpec::parse`)
//! or from a JSON configuration file, and are turned into boxed filters by
//! `FilterSpec::build`.
//!
//! | name       | params             | keeps                               |
//! |------------|--------------------|-------------------------------------|
//! | `breeding` | none               | records with breeding evidence      |
//! | `date`     | start, end (dates) | records dated within [start, end]   |

use crate::error::{EngineError, Result};
use crate::filters::{BreedingFilter, DateFilter};
use crate::traits::Filter;
use chrono::NaiveDate;
use record_loader::parser::parse_date;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FilterSpec {
    Breeding,
    Date { start: NaiveDate, end: NaiveDate },
}

impl FilterSpec {
    /// Build a spec from a filter name and its string parameters.
    ///
    /// # Errors
    /// * `UnknownFilterKind` - `name` is not a recognised kind
    /// * `InvalidParameters` - wrong parameter count, unparseable date,
    ///   or a date range whose start is after its end
    pub fn parse<S: AsRef<str>>(name: &str, params: &[S]) -> Result<Self> {
        let kind = name.trim().to_ascii_lowercase();
        let spec = match kind.as_str() {
            "breeding" => {
                expect_arity("breeding", params, 0)?;
                FilterSpec::Breeding
            }
            "date" => {
                expect_arity("date", params, 2)?;
                FilterSpec::Date {
                    start: date_param("start", params[0].as_ref())?,
                    end: date_param("end", params[1].as_ref())?,
                }
            }
            _ => return Err(EngineError::UnknownFilterKind(name.to_string())),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Name of the filter kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FilterSpec::Breeding => "breeding",
            FilterSpec::Date { .. } => "date",
        }
    }

    /// Check invariants that deserialization cannot enforce.
    pub fn validate(&self) -> Result<()> {
        match self {
            FilterSpec::Breeding => Ok(()),
            FilterSpec::Date { start, end } => DateFilter::new(*start, *end).map(|_| ()),
        }
    }

    /// Construct the filter this spec describes.
    pub fn build(&self) -> Result<Box<dyn Filter>> {
        let filter: Box<dyn Filter> = match self {
            FilterSpec::Breeding => Box::new(BreedingFilter),
            FilterSpec::Date { start, end } => Box::new(DateFilter::new(*start, *end)?),
        };
        Ok(filter)
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSpec::Breeding => write!(f, "breeding"),
            FilterSpec::Date { start, end } => write!(f, "date [{}, {}]", start, end),
        }
    }
}

fn expect_arity<S>(filter: &str, params: &[S], expected: usize) -> Result<()> {
    if params.len() != expected {
        return Err(EngineError::invalid(
            filter,
            format!("expected {} parameter(s), got {}", expected, params.len()),
        ));
    }
    Ok(())
}

fn date_param(which: &str, value: &str) -> Result<NaiveDate> {
    parse_date(value).ok_or_else(|| {
        EngineError::invalid(
            "date",
            format!("{} {:?} is not a YYYY-MM-DD date", which, value),
        )
    })
}
