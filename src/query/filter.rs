//! Row filters returning new views over a processed dataset.

use crate::data::{parse_date, Dataset, ParseError};
use chrono::Datelike;

/// Rows whose `std_deviation` is at least `threshold`.
pub fn filter_by_deviation(dataset: &Dataset, threshold: f64) -> Dataset {
    dataset.retain_view(|obs| obs.std_deviation >= threshold)
}

/// Rows with `start <= date <= end`. Both bounds must be `YYYY-MM-DD`;
/// an inverted range is empty rather than an error.
pub fn filter_by_date_range(dataset: &Dataset, start: &str, end: &str) -> Result<Dataset, ParseError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    Ok(dataset.retain_view(|obs| start <= obs.date && obs.date <= end))
}

/// Rows falling in calendar month `month` (1-12) of any year.
pub fn filter_by_month(dataset: &Dataset, month: u32) -> Dataset {
    dataset.retain_view(|obs| obs.date.month() == month)
}
