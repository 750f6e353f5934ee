//! Statistics Calculator Module
//! Handles descriptive statistics, central values and absolute deviations.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::fmt;

/// Central-tendency statistic a deviation is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Centre {
    #[default]
    Mean,
    Median,
}

/// Descriptive statistics for a numeric column (pandas `describe` layout).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl Default for NumericSummary {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            p50: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

impl fmt::Display for NumericSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "count  {:>14.6}", self.count as f64)?;
        writeln!(f, "mean   {:>14.6}", self.mean)?;
        writeln!(f, "std    {:>14.6}", self.std)?;
        writeln!(f, "min    {:>14.6}", self.min)?;
        writeln!(f, "25%    {:>14.6}", self.p25)?;
        writeln!(f, "50%    {:>14.6}", self.p50)?;
        writeln!(f, "75%    {:>14.6}", self.p75)?;
        write!(f, "max    {:>14.6}", self.max)
    }
}

/// Descriptive statistics for the date column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateSummary {
    pub count: usize,
    pub mean: NaiveDate,
    pub min: NaiveDate,
    pub p25: NaiveDate,
    pub p50: NaiveDate,
    pub p75: NaiveDate,
    pub max: NaiveDate,
}

impl fmt::Display for DateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "count  {:>10}", self.count)?;
        writeln!(f, "mean   {}", self.mean)?;
        writeln!(f, "min    {}", self.min)?;
        writeln!(f, "25%    {}", self.p25)?;
        writeln!(f, "50%    {}", self.p50)?;
        writeln!(f, "75%    {}", self.p75)?;
        write!(f, "max    {}", self.max)
    }
}

/// Summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Summary {
    Numeric(NumericSummary),
    Temporal(DateSummary),
}

impl Summary {
    pub fn count(&self) -> usize {
        match self {
            Summary::Numeric(s) => s.count,
            Summary::Temporal(s) => s.count,
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericSummary> {
        match self {
            Summary::Numeric(s) => Some(s),
            Summary::Temporal(_) => None,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Numeric(s) => s.fmt(f),
            Summary::Temporal(s) => s.fmt(f),
        }
    }
}

/// Stateless statistical helpers.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Arithmetic mean; NaN for no values.
    pub fn mean(values: &[f64]) -> f64 {
        values.iter().mean()
    }

    /// Median with the even-count average-of-middles rule; NaN for no values.
    pub fn median(values: &[f64]) -> f64 {
        let sorted = Self::sorted(values);
        let n = sorted.len();
        if n == 0 {
            return f64::NAN;
        }
        if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        }
    }

    pub fn central_value(values: &[f64], centre: Centre) -> f64 {
        match centre {
            Centre::Mean => Self::mean(values),
            Centre::Median => Self::median(values),
        }
    }

    /// `|centre - v|` for every value, in input order.
    pub fn absolute_deviations(values: &[f64], centre: Centre) -> Vec<f64> {
        let c = Self::central_value(values, centre);
        values.iter().map(|v| (c - v).abs()).collect()
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> NumericSummary {
        let n = values.len();
        if n == 0 {
            return NumericSummary::default();
        }

        let sorted = Self::sorted(values);

        NumericSummary {
            count: n,
            mean: values.iter().mean(),
            // Sample standard deviation (n - 1); NaN for a single value.
            std: values.iter().std_dev(),
            min: Statistics::min(values.iter()),
            p25: Self::percentile(&sorted, 25.0),
            p50: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: Statistics::max(values.iter()),
        }
    }

    /// Descriptive statistics over dates. Quantiles are interpolated on day
    /// numbers and rounded to the nearest day.
    pub fn compute_date_stats(dates: &[NaiveDate]) -> Option<DateSummary> {
        let epoch = *dates.iter().min()?;
        let offsets: Vec<f64> = dates
            .iter()
            .map(|d| (*d - epoch).num_days() as f64)
            .collect();
        let sorted = Self::sorted(&offsets);
        let at = |days: f64| epoch + Days::new(days.round() as u64);

        Some(DateSummary {
            count: dates.len(),
            mean: at(offsets.iter().mean()),
            min: epoch,
            p25: at(Self::percentile(&sorted, 25.0)),
            p50: at(Self::percentile(&sorted, 50.0)),
            p75: at(Self::percentile(&sorted, 75.0)),
            max: *dates.iter().max()?,
        })
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted
    }
}
