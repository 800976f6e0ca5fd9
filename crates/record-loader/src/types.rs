//! Core domain types for observation records.
//!
//! A record is one line of a tab-separated observation file. Only the
//! columns the filters need are parsed; the original line is kept verbatim
//! so matching records can be written back out unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Breeding evidence
// =============================================================================

/// eBird breeding atlas categories, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BreedingCategory {
    /// C1: species observed, no breeding behaviour (e.g. flyover)
    Observed,
    /// C2: possible breeding
    Possible,
    /// C3: probable breeding
    Probable,
    /// C4: confirmed breeding
    Confirmed,
}

impl BreedingCategory {
    /// Look up the category of an atlas code.
    ///
    /// The code is expected trimmed and upper-cased.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "F" => Some(BreedingCategory::Observed),
            "H" | "S" => Some(BreedingCategory::Possible),
            "S7" | "M" | "P" | "T" | "C" | "N" | "A" | "B" | "PE" => {
                Some(BreedingCategory::Probable)
            }
            "CN" | "NB" | "DD" | "UN" | "ON" | "FL" | "CF" | "FY" | "FS" | "NE" | "NY" => {
                Some(BreedingCategory::Confirmed)
            }
            _ => None,
        }
    }

    /// Whether the category counts as breeding evidence.
    pub fn is_evidence(self) -> bool {
        self >= BreedingCategory::Possible
    }
}

/// Contents of a record's breeding column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreedingStatus {
    /// Empty cell
    Absent,
    /// Boolean cell (`true`, `no`, `1`, ...)
    Flag(bool),
    /// Atlas code with its category
    Code {
        code: String,
        category: BreedingCategory,
    },
}

impl BreedingStatus {
    pub fn is_evidence(&self) -> bool {
        match self {
            BreedingStatus::Absent => false,
            BreedingStatus::Flag(flag) => *flag,
            BreedingStatus::Code { category, .. } => category.is_evidence(),
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// One observation read from the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// 1-based line number in the input
    pub line: usize,
    pub observation_date: NaiveDate,
    pub breeding: BreedingStatus,
    /// Original line without its terminator
    pub raw: String,
}

// =============================================================================
// Schema
// =============================================================================

/// Header names accepted for the observation date column.
pub const DATE_COLUMNS: &[&str] = &["OBSERVATION DATE", "DATE"];

/// Header names accepted for the breeding column.
pub const BREEDING_COLUMNS: &[&str] = &["BREEDING CODE", "BREEDING BIRD ATLAS CODE", "BREEDING"];

/// Column positions resolved from the header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub columns: Vec<String>,
    pub date_index: usize,
    pub breeding_index: usize,
}

impl Schema {
    /// Minimum number of fields a data line must have.
    pub fn required_fields(&self) -> usize {
        self.date_index.max(self.breeding_index) + 1
    }
}
