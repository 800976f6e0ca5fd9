//! Parser for tab-separated observation lines.
//!
//! Input layout:
//! - first non-empty line: header, tab-separated column names
//! - every following non-empty line: one record
//!
//! Only the date and breeding columns are interpreted. Dates are
//! `YYYY-MM-DD`; the breeding cell is empty, a boolean, or an atlas code.

use crate::error::{RecordError, Result};
use crate::types::*;
use chrono::NaiveDate;

const DELIMITER: char = '\t';

/// Strip a trailing `\n` and `\r` from a raw input line.
pub(crate) fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches('\n').trim_end_matches('\r')
}

fn find_column(columns: &[String], accepted: &[&str]) -> Option<usize> {
    columns.iter().position(|column| {
        let column = column.trim();
        accepted
            .iter()
            .any(|candidate| column.eq_ignore_ascii_case(candidate))
    })
}

/// Parse the header line into a Schema
pub fn parse_header(line: &str) -> Result<Schema> {
    let columns: Vec<String> = trim_line_ending(line)
        .split(DELIMITER)
        .map(|s| s.to_string())
        .collect();

    let date_index = find_column(&columns, DATE_COLUMNS).ok_or_else(|| {
        RecordError::MissingColumn {
            column: DATE_COLUMNS[0].to_string(),
        }
    })?;
    let breeding_index = find_column(&columns, BREEDING_COLUMNS).ok_or_else(|| {
        RecordError::MissingColumn {
            column: BREEDING_COLUMNS[0].to_string(),
        }
    })?;

    Ok(Schema {
        columns,
        date_index,
        breeding_index,
    })
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a breeding cell
///
/// Example: ""     -> BreedingStatus::Absent
///          "yes"  -> BreedingStatus::Flag(true)
///          "fy "  -> BreedingStatus::Code { code: "FY", category: Confirmed }
pub fn parse_breeding(s: &str) -> Option<BreedingStatus> {
    let value = s.trim();
    if value.is_empty() {
        return Some(BreedingStatus::Absent);
    }

    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => return Some(BreedingStatus::Flag(true)),
        "false" | "no" | "0" => return Some(BreedingStatus::Flag(false)),
        _ => {}
    }

    let code = value.to_ascii_uppercase();
    let category = BreedingCategory::from_code(&code)?;
    Some(BreedingStatus::Code { code, category })
}

/// Parse one data line into a Record.
///
/// `line_no` is 1-based and only used for error context.
pub fn parse_record(schema: &Schema, line: &str, line_no: usize) -> Result<Record> {
    let raw = trim_line_ending(line);
    let fields: Vec<&str> = raw.split(DELIMITER).collect();

    if fields.len() < schema.required_fields() {
        return Err(RecordError::FieldCountMismatch {
            expected: schema.required_fields(),
            found: fields.len(),
            line: line_no,
        });
    }

    let date_str = fields[schema.date_index];
    if date_str.trim().is_empty() {
        return Err(RecordError::ParseError {
            line: line_no,
            reason: "Missing observation date".to_string(),
        });
    }
    let observation_date = parse_date(date_str).ok_or_else(|| RecordError::InvalidValue {
        line: line_no,
        field: "observation date".to_string(),
        value: date_str.to_string(),
    })?;

    let breeding_str = fields[schema.breeding_index];
    let breeding = parse_breeding(breeding_str).ok_or_else(|| RecordError::InvalidValue {
        line: line_no,
        field: "breeding code".to_string(),
        value: breeding_str.to_string(),
    })?;

    Ok(Record {
        line: line_no,
        observation_date,
        breeding,
        raw: raw.to_string(),
    })
}
