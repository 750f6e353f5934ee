//! Analysis configuration, read from an optional TOML file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Inclusive date window, as `YYYY-MM-DD` literals.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: "2021-11-11".to_string(),
            end: "2021-11-22".to_string(),
        }
    }
}

/// Chart export settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartSettings {
    pub enabled: bool,
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: PathBuf::from("charts"),
            width: 1024,
            height: 600,
        }
    }
}

/// One analysis run: which file to read and which queries to print.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub dataset: PathBuf,
    pub delimiter: char,
    pub deviation_threshold: f64,
    pub summary_fields: Vec<String>,
    pub date_range: DateRange,
    pub charts: ChartSettings,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("dataset.csv"),
            delimiter: ',',
            deviation_threshold: 25.0,
            summary_fields: vec![
                "Value".to_string(),
                "MedianDeviation".to_string(),
                "StdDeviation".to_string(),
            ],
            date_range: DateRange::default(),
            charts: ChartSettings::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a config file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The delimiter as a byte; validated to be ASCII.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.delimiter.is_ascii() || self.delimiter == '"' || self.delimiter == '\n' {
            return Err(ConfigError::Invalid(format!(
                "delimiter must be a single ASCII character other than quote or newline, got {:?}",
                self.delimiter
            )));
        }
        if !self.deviation_threshold.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "deviation_threshold must be finite, got {}",
                self.deviation_threshold
            )));
        }
        for (name, size) in [("width", self.charts.width), ("height", self.charts.height)] {
            if !(64..=8192).contains(&size) {
                return Err(ConfigError::Invalid(format!(
                    "charts.{name} must be in 64..=8192, got {size}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AnalysisConfig::from_toml("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.delimiter_byte(), b',');
    }

    #[test]
    fn overrides_are_applied() {
        let config = AnalysisConfig::from_toml(
            r#"
dataset = "prices.csv"
delimiter = ";"
deviation_threshold = 5.5
summary_fields = ["Value"]

[date_range]
start = "2022-01-01"
end = "2022-02-01"

[charts]
enabled = false
width = 800
"#,
        )
        .unwrap();

        assert_eq!(config.dataset, PathBuf::from("prices.csv"));
        assert_eq!(config.delimiter_byte(), b';');
        assert_eq!(config.deviation_threshold, 5.5);
        assert_eq!(config.summary_fields, vec!["Value".to_string()]);
        assert_eq!(config.date_range.start, "2022-01-01");
        assert!(!config.charts.enabled);
        assert_eq!(config.charts.width, 800);
        assert_eq!(config.charts.height, 600);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            AnalysisConfig::from_toml("delimiter = \"é\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml("[charts]\nwidth = 10"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml("unknown_key = 1"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AnalysisConfig::from_file("/no/such/config.toml").unwrap_err();
        assert!(err.to_string().contains("/no/such/config.toml"));
    }
}
