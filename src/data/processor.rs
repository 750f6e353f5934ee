//! Data Processor Module
//! Handles data cleaning and derivation of the deviation columns.

use super::loader::{DataLoader, LoaderError};
use super::model::{Centres, Dataset, Observation, RawRecord, RawTable};
use crate::stats::{Centre, StatsCalculator};
use std::path::Path;

/// Options for the load → clean → derive pipeline.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub delimiter: u8,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Drop every row with a missing cell.
    ///
    /// When rows are dropped the survivors are relabelled `0..n` in their
    /// original order. A table with nothing missing is returned untouched.
    pub fn clean(table: RawTable) -> RawTable {
        let missing = table.missing_count();
        if missing == 0 {
            return table;
        }

        log::debug!("dropping {missing} of {} rows with missing cells", table.len());

        let records = table
            .records
            .into_iter()
            .filter(RawRecord::is_complete)
            .enumerate()
            .map(|(index, record)| RawRecord { index, ..record })
            .collect();

        RawTable { records }
    }

    /// Append `median_deviation` and `std_deviation` to every complete row.
    ///
    /// Both centres come from the whole table and are fixed for the lifetime
    /// of the returned dataset.
    pub fn derive(table: RawTable) -> Dataset {
        let skipped = table.missing_count();
        if skipped > 0 {
            log::warn!("derive skipped {skipped} incomplete rows; run clean first");
        }

        let rows: Vec<(usize, chrono::NaiveDate, f64)> = table
            .records
            .into_iter()
            .filter_map(|r| Some((r.index, r.date?, r.value?)))
            .collect();
        let values: Vec<f64> = rows.iter().map(|&(_, _, v)| v).collect();

        let centres = Centres {
            mean: StatsCalculator::central_value(&values, Centre::Mean),
            median: StatsCalculator::central_value(&values, Centre::Median),
        };
        log::debug!(
            "derived centres over {} rows: mean={}, median={}",
            values.len(),
            centres.mean,
            centres.median
        );

        let median_dev = StatsCalculator::absolute_deviations(&values, Centre::Median);
        let mean_dev = StatsCalculator::absolute_deviations(&values, Centre::Mean);

        let observations = rows
            .into_iter()
            .zip(median_dev.into_iter().zip(mean_dev))
            .map(|((index, date, value), (median_deviation, std_deviation))| Observation {
                index,
                date,
                value,
                median_deviation,
                std_deviation,
            })
            .collect();

        Dataset::new(observations, centres)
    }

    /// Load, clean and derive in one pass.
    pub fn get_processed(
        path: impl AsRef<Path>,
        options: &ProcessOptions,
    ) -> Result<Dataset, LoaderError> {
        let raw = DataLoader::new()
            .with_delimiter(options.delimiter)
            .load(path)?;
        Ok(Self::derive(Self::clean(raw)))
    }
}

/// Load, clean and derive `path` with default options.
pub fn get_processed(path: impl AsRef<Path>) -> Result<Dataset, LoaderError> {
    DataProcessor::get_processed(path, &ProcessOptions::default())
}
