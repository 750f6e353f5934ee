//! Chart Plotter Module
//! Builds backend-independent chart descriptions from query results.

use crate::data::Dataset;
use crate::query::filter_by_month;
use crate::stats::StatsCalculator;
use chrono::NaiveDate;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One polyline of `(date, value)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// A horizontal line across the whole x-range.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub label: String,
    pub y: f64,
}

/// Everything a renderer needs to draw a value-over-time chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ChartSeries>,
    pub reference_lines: Vec<ReferenceLine>,
}

impl LineChart {
    /// Earliest and latest date over all series.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Smallest and largest y over all series and reference lines.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let ys = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.1))
            .chain(self.reference_lines.iter().map(|r| r.y))
            .filter(|y| y.is_finite());

        ys.fold(None, |acc, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((f64::min(lo, y), f64::max(hi, y))),
        })
    }
}

/// Creates chart descriptions; rendering lives in [`crate::charts::renderer`].
pub struct ChartPlotter;

impl ChartPlotter {
    /// Value against date over the whole dataset.
    pub fn full_period_chart(dataset: &Dataset) -> LineChart {
        LineChart {
            title: "Value over the full period".to_string(),
            x_label: "Date".to_string(),
            y_label: "Value".to_string(),
            series: vec![Self::value_series("Value", dataset)],
            reference_lines: Vec::new(),
        }
    }

    /// One chart per month present, each with the month's mean and median
    /// drawn as reference lines.
    pub fn monthly_charts(dataset: &Dataset) -> Vec<LineChart> {
        dataset
            .months()
            .into_iter()
            .map(|month| Self::month_chart(dataset, month))
            .collect()
    }

    /// Chart of one calendar month (any year).
    pub fn month_chart(dataset: &Dataset, month: u32) -> LineChart {
        let view = filter_by_month(dataset, month);
        let values = view.values();
        let mean = StatsCalculator::mean(&values);
        let median = StatsCalculator::median(&values);

        LineChart {
            title: Self::month_name(month).to_string(),
            x_label: "Date".to_string(),
            y_label: "Value".to_string(),
            series: vec![Self::value_series("Value", &view)],
            reference_lines: vec![
                ReferenceLine {
                    label: "Mean".to_string(),
                    y: mean,
                },
                ReferenceLine {
                    label: "Median".to_string(),
                    y: median,
                },
            ],
        }
    }

    pub fn month_name(month: u32) -> &'static str {
        month
            .checked_sub(1)
            .and_then(|i| MONTH_NAMES.get(i as usize))
            .copied()
            .unwrap_or("Unknown month")
    }

    fn value_series(name: &str, dataset: &Dataset) -> ChartSeries {
        ChartSeries {
            name: name.to_string(),
            points: dataset
                .observations
                .iter()
                .map(|o| (o.date, o.value))
                .collect(),
        }
    }
}
