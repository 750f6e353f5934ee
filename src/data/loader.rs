//! CSV Data Loader Module
//! Reads headerless `date,value` files into a raw table using Polars.

use super::model::{RawRecord, RawTable};
use super::parse::{parse_date_cell, parse_value_cell, ParseError};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// The file carries exactly these two columns, in this order.
const EXPECTED_COLUMNS: usize = 2;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to open dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Expected {EXPECTED_COLUMNS} columns (date, value), found {0}")]
    ColumnCount(usize),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Loads headerless two-column CSV files.
#[derive(Debug, Clone)]
pub struct DataLoader {
    delimiter: u8,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load a dataset file. Cells are read as text so that malformed dates
    /// and numbers surface as [`ParseError`]s instead of silent nulls.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<RawTable, LoaderError> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let df = CsvReadOptions::default()
            .with_has_header(false)
            .with_infer_schema_length(Some(0))
            .with_parse_options(CsvParseOptions::default().with_separator(self.delimiter))
            .into_reader_with_file_handle(file)
            .finish()?;

        let table = Self::table_from_dataframe(&df)?;
        log::debug!("loaded {} rows from {}", table.len(), path.display());
        Ok(table)
    }

    /// Convert an all-text two-column frame into typed raw records.
    fn table_from_dataframe(df: &DataFrame) -> Result<RawTable, LoaderError> {
        let columns = df.get_columns();
        if columns.len() != EXPECTED_COLUMNS {
            return Err(LoaderError::ColumnCount(columns.len()));
        }

        let dates = columns[0].str()?;
        let values = columns[1].str()?;

        let records = dates
            .into_iter()
            .zip(values.into_iter())
            .enumerate()
            .map(|(index, (date, value))| {
                Ok(RawRecord {
                    index,
                    date: parse_date_cell(date, index)?,
                    value: parse_value_cell(value, index)?,
                })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        Ok(RawTable { records })
    }
}

/// Load `path` with the default comma delimiter.
pub fn load(path: impl AsRef<Path>) -> Result<RawTable, LoaderError> {
    DataLoader::new().load(path)
}
