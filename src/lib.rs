//! tsdeviation - Time-series CSV cleaning, deviation metrics & chart export
//!
//! ```text
//!  date,value CSV
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  headerless file → RawTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ processor  │  clean missing rows, derive deviations → Dataset
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  query    │  summary, filters, month averages
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  charts   │  LineChart descriptions (+ SVG rendering)
//!   └──────────┘
//! ```

pub mod charts;
pub mod config;
pub mod data;
pub mod query;
pub mod stats;

pub use data::{get_processed, Dataset, Field, Observation, ParseError};
pub use query::{
    filter_by_date_range, filter_by_deviation, filter_by_month, group_by_month_average, summary,
};
