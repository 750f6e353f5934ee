//! Dataset Model Module
//! Raw rows as read from disk and processed observations with derived deviations.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Canonical column names, in output order.
pub const DATE_COL: &str = "Date";
pub const VALUE_COL: &str = "Value";
pub const MEDIAN_DEVIATION_COL: &str = "MedianDeviation";
pub const STD_DEVIATION_COL: &str = "StdDeviation";

/// A column of the processed dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    Date,
    Value,
    MedianDeviation,
    /// Absolute deviation from the mean (the historical column name is kept).
    StdDeviation,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Date,
        Field::Value,
        Field::MedianDeviation,
        Field::StdDeviation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Date => DATE_COL,
            Field::Value => VALUE_COL,
            Field::MedianDeviation => MEDIAN_DEVIATION_COL,
            Field::StdDeviation => STD_DEVIATION_COL,
        }
    }

    /// Look up a column by its canonical name or its snake_case alias.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            DATE_COL | "date" => Some(Field::Date),
            VALUE_COL | "value" => Some(Field::Value),
            MEDIAN_DEVIATION_COL | "median_deviation" => Some(Field::MedianDeviation),
            STD_DEVIATION_COL | "std_deviation" => Some(Field::StdDeviation),
            _ => None,
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown field '{s}'"))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// One row as read from the file. Empty cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Row label, 0-based.
    pub index: usize,
    pub date: Option<NaiveDate>,
    pub value: Option<f64>,
}

impl RawRecord {
    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.value.is_some()
    }
}

/// Rows in file order, before cleaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub records: Vec<RawRecord>,
}

impl RawTable {
    /// Build a table from `(date, value)` pairs, labelling rows in order.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Option<NaiveDate>, Option<f64>)>,
    {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(index, (date, value))| RawRecord { index, date, value })
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows with at least one missing cell.
    pub fn missing_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_complete()).count()
    }
}

// ---------------------------------------------------------------------------
// Processed rows
// ---------------------------------------------------------------------------

/// One processed row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    /// Row label after cleaning. Filtered views keep it unchanged.
    pub index: usize,
    pub date: NaiveDate,
    pub value: f64,
    /// `|median - value|` against the full cleaned dataset.
    pub median_deviation: f64,
    /// `|mean - value|` against the full cleaned dataset.
    pub std_deviation: f64,
}

impl Observation {
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Numeric cell for a field; dates map to `None`.
    pub fn numeric(&self, field: Field) -> Option<f64> {
        match field {
            Field::Date => None,
            Field::Value => Some(self.value),
            Field::MedianDeviation => Some(self.median_deviation),
            Field::StdDeviation => Some(self.std_deviation),
        }
    }
}

/// Central values the deviations were computed against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Centres {
    pub mean: f64,
    pub median: f64,
}

impl Default for Centres {
    fn default() -> Self {
        Self {
            mean: f64::NAN,
            median: f64::NAN,
        }
    }
}

/// The processed dataset. Filtering produces new datasets sharing the
/// original [`Centres`] and deviation values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub observations: Vec<Observation>,
    pub centres: Centres,
}

impl Dataset {
    pub fn new(observations: Vec<Observation>, centres: Centres) -> Self {
        Self {
            observations,
            centres,
        }
    }

    /// Keep the rows matching `predicate`, in order.
    pub fn retain_view<F>(&self, predicate: F) -> Dataset
    where
        F: Fn(&Observation) -> bool,
    {
        Dataset {
            observations: self
                .observations
                .iter()
                .filter(|obs| predicate(obs))
                .copied()
                .collect(),
            centres: self.centres,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.observations.iter().map(|o| o.index).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// All cells of a numeric column; `None` for the date column.
    pub fn column(&self, field: Field) -> Option<Vec<f64>> {
        if field == Field::Date {
            return None;
        }
        Some(
            self.observations
                .iter()
                .filter_map(|o| o.numeric(field))
                .collect(),
        )
    }

    /// Distinct calendar months present, ascending.
    pub fn months(&self) -> Vec<u32> {
        let mut months: Vec<u32> = self.observations.iter().map(|o| o.month()).collect();
        months.sort_unstable();
        months.dedup();
        months
    }

    /// Export as a Polars DataFrame with the canonical column names.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let index: Vec<u64> = self.observations.iter().map(|o| o.index as u64).collect();
        let median_dev: Vec<f64> = self.observations.iter().map(|o| o.median_deviation).collect();
        let std_dev: Vec<f64> = self.observations.iter().map(|o| o.std_deviation).collect();

        DataFrame::new(vec![
            Column::new("index".into(), index),
            Column::new(DATE_COL.into(), self.dates()),
            Column::new(VALUE_COL.into(), self.values()),
            Column::new(MEDIAN_DEVIATION_COL.into(), median_dev),
            Column::new(STD_DEVIATION_COL.into(), std_dev),
        ])
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>6}  {:<10}  {:>12}  {:>16}  {:>14}",
            "", DATE_COL, VALUE_COL, MEDIAN_DEVIATION_COL, STD_DEVIATION_COL
        )?;
        for obs in &self.observations {
            writeln!(
                f,
                "{:>6}  {:<10}  {:>12.4}  {:>16.4}  {:>14.4}",
                obs.index, obs.date, obs.value, obs.median_deviation, obs.std_deviation
            )?;
        }
        write!(f, "[{} rows x 4 columns]", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn obs(index: usize, d: &str, value: f64) -> Observation {
        Observation {
            index,
            date: date(d),
            value,
            median_deviation: 0.0,
            std_deviation: 0.0,
        }
    }

    #[test]
    fn field_names_and_aliases() {
        assert_eq!(Field::from_name("Value"), Some(Field::Value));
        assert_eq!(Field::from_name("std_deviation"), Some(Field::StdDeviation));
        assert_eq!(Field::from_name("Unknown"), None);
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
    }

    #[test]
    fn months_are_distinct_and_sorted() {
        let ds = Dataset::new(
            vec![
                obs(0, "2021-12-01", 1.0),
                obs(1, "2020-03-05", 2.0),
                obs(2, "2021-12-24", 3.0),
            ],
            Centres::default(),
        );
        assert_eq!(ds.months(), vec![3, 12]);
        assert_eq!(ds.column(Field::Date), None);
        assert_eq!(ds.column(Field::Value), Some(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn retain_view_keeps_labels_and_centres() {
        let centres = Centres {
            mean: 2.0,
            median: 2.0,
        };
        let ds = Dataset::new(
            vec![obs(0, "2021-01-01", 1.0), obs(1, "2021-01-02", 5.0)],
            centres,
        );
        let view = ds.retain_view(|o| o.value > 2.0);
        assert_eq!(view.indices(), vec![1]);
        assert_eq!(view.centres, centres);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn dataframe_export_has_canonical_columns() {
        let ds = Dataset::new(vec![obs(0, "2021-01-01", 1.0)], Centres::default());
        let df = ds.to_dataframe().unwrap();
        assert_eq!(df.height(), 1);
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            vec!["index", DATE_COL, VALUE_COL, MEDIAN_DEVIATION_COL, STD_DEVIATION_COL]
        );
    }

    #[test]
    fn raw_table_counts_missing_rows() {
        let table = RawTable::from_rows(vec![
            (Some(date("2021-01-01")), Some(1.0)),
            (None, Some(2.0)),
            (Some(date("2021-01-03")), None),
        ]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.missing_count(), 2);
        assert_eq!(table.records[2].index, 2);
    }
}
