//! Data module - CSV loading, cleaning and derivation

pub mod loader;
pub mod model;
pub mod parse;
pub mod processor;

pub use loader::{load, DataLoader, LoaderError};
pub use model::{Centres, Dataset, Field, Observation, RawRecord, RawTable};
pub use parse::{parse_date, ParseError, DATE_FORMAT};
pub use processor::{get_processed, DataProcessor, ProcessOptions};
