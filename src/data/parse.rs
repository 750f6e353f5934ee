//! Cell parsing shared by the loader and the date-range query.

use chrono::NaiveDate;
use thiserror::Error;

/// The only accepted date layout.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("{} '{input}' does not match YYYY-MM-DD", location(.row, "date"))]
    Date { row: Option<usize>, input: String },
    #[error("{} '{input}' is not a number", location(.row, "value"))]
    Value { row: Option<usize>, input: String },
}

fn location(row: &Option<usize>, what: &str) -> String {
    match row {
        Some(row) => format!("row {row}: {what}"),
        None => what.to_string(),
    }
}

/// Parse a `YYYY-MM-DD` literal.
pub fn parse_date(input: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| ParseError::Date {
        row: None,
        input: input.to_string(),
    })
}

/// Parse an optional date cell. Empty cells are missing, not malformed.
pub fn parse_date_cell(cell: Option<&str>, row: usize) -> Result<Option<NaiveDate>, ParseError> {
    match cell.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_date(text)
            .map(Some)
            .map_err(|_| ParseError::Date {
                row: Some(row),
                input: text.to_string(),
            }),
    }
}

/// Parse an optional numeric cell. Empty cells and `NaN` literals are missing.
pub fn parse_value_cell(cell: Option<&str>, row: usize) -> Result<Option<f64>, ParseError> {
    match cell.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => {
            let value = text.parse::<f64>().map_err(|_| ParseError::Value {
                row: Some(row),
                input: text.to_string(),
            })?;
            Ok((!value.is_nan()).then_some(value))
        }
    }
}
