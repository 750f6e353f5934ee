//! Query module - Read-only views and aggregates over a processed dataset

mod aggregate;
mod filter;

pub use aggregate::{group_by_month_average, summary};
pub use filter::{filter_by_date_range, filter_by_deviation, filter_by_month};
