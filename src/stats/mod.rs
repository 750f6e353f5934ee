//! Stats module - Descriptive statistics and deviations

mod calculator;

pub use calculator::{Centre, DateSummary, NumericSummary, StatsCalculator, Summary};
