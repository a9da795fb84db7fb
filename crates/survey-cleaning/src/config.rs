//! Configuration for the survey cleaning run.
//!
//! Every field defaults to the fixed constant the cleaning rules are defined
//! with, so `CleaningConfig::default()` reproduces the canonical behavior.
//! The builder only exists so that callers (the CLI, tests) can redirect
//! output artifacts or tighten bounds without touching the rules themselves.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for assessment, cleaning and output.
///
/// # Example
///
/// ```rust,ignore
/// use survey_cleaning::config::CleaningConfig;
///
/// let config = CleaningConfig::builder()
///     .output_dir("out")
///     .chart_size(1600, 1000)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Smallest valid age (inclusive).
    /// Default: 0
    pub min_age: i64,

    /// Largest valid age (inclusive).
    /// Default: 120
    pub max_age: i64,

    /// Lower bound ratings are clamped to.
    /// Default: 1
    pub min_rating: i64,

    /// Upper bound ratings are clamped to.
    /// Default: 5
    pub max_rating: i64,

    /// Placeholder for a missing customer name.
    /// Default: "Unknown Customer"
    pub unknown_name: String,

    /// Placeholder for a missing email address.
    /// Default: "no_email@unknown.com"
    pub unknown_email: String,

    /// Directory the CSV, chart and JSON report are written to.
    /// Default: "."
    pub output_dir: PathBuf,

    /// File name of the cleaned CSV.
    /// Default: "cleaned_customer_survey.csv"
    pub csv_name: String,

    /// File name of the four-panel chart.
    /// Default: "data_cleaning_analysis.png"
    pub chart_name: String,

    /// Chart width in pixels.
    /// Default: 1200
    pub chart_width: u32,

    /// Chart height in pixels.
    /// Default: 800
    pub chart_height: u32,

    /// Number of bins in the age histogram.
    /// Default: 10
    pub age_bins: usize,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            min_age: 0,
            max_age: 120,
            min_rating: 1,
            max_rating: 5,
            unknown_name: "Unknown Customer".to_string(),
            unknown_email: "no_email@unknown.com".to_string(),
            output_dir: PathBuf::from("."),
            csv_name: "cleaned_customer_survey.csv".to_string(),
            chart_name: "data_cleaning_analysis.png".to_string(),
            chart_width: 1200,
            chart_height: 800,
            age_bins: 10,
        }
    }
}

/// Smallest chart side that still leaves room for four panels.
pub const MIN_CHART_SIDE: u32 = 200;

impl CleaningConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleaningConfigBuilder {
        CleaningConfigBuilder::default()
    }

    /// Full path of the chart image.
    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.chart_name)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.min_age >= self.max_age {
            return Err(ConfigValidationError::InvalidRange {
                field: "age".to_string(),
                min: self.min_age,
                max: self.max_age,
            });
        }

        if self.min_rating >= self.max_rating {
            return Err(ConfigValidationError::InvalidRange {
                field: "satisfaction_rating".to_string(),
                min: self.min_rating,
                max: self.max_rating,
            });
        }

        if self.csv_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFileName("csv_name".to_string()));
        }

        if self.chart_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFileName("chart_name".to_string()));
        }

        if self.chart_width < MIN_CHART_SIDE || self.chart_height < MIN_CHART_SIDE {
            return Err(ConfigValidationError::ChartTooSmall {
                width: self.chart_width,
                height: self.chart_height,
            });
        }

        if self.age_bins == 0 {
            return Err(ConfigValidationError::InvalidAgeBins(self.age_bins));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid range for '{field}': min {min} must be below max {max}")]
    InvalidRange { field: String, min: i64, max: i64 },

    #[error("File name '{0}' must not be empty")]
    EmptyFileName(String),

    #[error("Chart size {width}x{height} is too small (minimum side is 200px)")]
    ChartTooSmall { width: u32, height: u32 },

    #[error("Invalid age bin count: {0} (must be at least 1)")]
    InvalidAgeBins(usize),
}

impl From<ConfigValidationError> for crate::error::CleaningError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::CleaningError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`CleaningConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningConfigBuilder {
    age_range: Option<(i64, i64)>,
    rating_range: Option<(i64, i64)>,
    unknown_name: Option<String>,
    unknown_email: Option<String>,
    output_dir: Option<PathBuf>,
    csv_name: Option<String>,
    chart_name: Option<String>,
    chart_size: Option<(u32, u32)>,
    age_bins: Option<usize>,
}

impl CleaningConfigBuilder {
    /// Set the inclusive valid age range.
    pub fn age_range(mut self, min: i64, max: i64) -> Self {
        self.age_range = Some((min, max));
        self
    }

    /// Set the inclusive rating range ratings are clamped into.
    pub fn rating_range(mut self, min: i64, max: i64) -> Self {
        self.rating_range = Some((min, max));
        self
    }

    /// Set the placeholder used for missing names.
    pub fn unknown_name(mut self, name: impl Into<String>) -> Self {
        self.unknown_name = Some(name.into());
        self
    }

    /// Set the placeholder used for missing emails.
    pub fn unknown_email(mut self, email: impl Into<String>) -> Self {
        self.unknown_email = Some(email.into());
        self
    }

    /// Set the directory output artifacts are written to.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the cleaned CSV file name.
    pub fn csv_name(mut self, name: impl Into<String>) -> Self {
        self.csv_name = Some(name.into());
        self
    }

    /// Set the chart image file name.
    pub fn chart_name(mut self, name: impl Into<String>) -> Self {
        self.chart_name = Some(name.into());
        self
    }

    /// Set the chart dimensions in pixels.
    pub fn chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_size = Some((width, height));
        self
    }

    /// Set the number of age histogram bins.
    pub fn age_bins(mut self, bins: usize) -> Self {
        self.age_bins = Some(bins);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleaningConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleaningConfig, ConfigValidationError> {
        let defaults = CleaningConfig::default();
        let (min_age, max_age) = self
            .age_range
            .unwrap_or((defaults.min_age, defaults.max_age));
        let (min_rating, max_rating) = self
            .rating_range
            .unwrap_or((defaults.min_rating, defaults.max_rating));
        let (chart_width, chart_height) = self
            .chart_size
            .unwrap_or((defaults.chart_width, defaults.chart_height));

        let config = CleaningConfig {
            min_age,
            max_age,
            min_rating,
            max_rating,
            unknown_name: self.unknown_name.unwrap_or(defaults.unknown_name),
            unknown_email: self.unknown_email.unwrap_or(defaults.unknown_email),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            csv_name: self.csv_name.unwrap_or(defaults.csv_name),
            chart_name: self.chart_name.unwrap_or(defaults.chart_name),
            chart_width,
            chart_height,
            age_bins: self.age_bins.unwrap_or(defaults.age_bins),
        };

        config.validate()?;
        Ok(config)
    }
}
