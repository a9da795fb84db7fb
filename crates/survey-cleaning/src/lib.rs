//! Customer Survey Cleaning Library
//!
//! Assessment, cleaning and reporting for a small customer-satisfaction
//! survey, built on Polars.
//!
//! # Overview
//!
//! A run goes through four stages:
//!
//! - **Quality Assessment**: counts missing values, duplicate rows, invalid
//!   ages and ratings, and category spelling variants ([`DataQualityAnalyzer`])
//! - **Cleaning**: seven ordered rules produce a new frame ([`SurveyCleaner`])
//! - **Reporting**: console sections, the cleaned CSV and a JSON report
//!   ([`ReportGenerator`])
//! - **Charts**: a four-panel PNG dashboard ([`DashboardRenderer`])
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use survey_cleaning::{CleaningConfig, SurveyPipeline};
//! use survey_cleaning::dataset::raw_survey;
//!
//! let config = CleaningConfig::builder()
//!     .output_dir("out")
//!     .build()?;
//!
//! let result = SurveyPipeline::new(config).process(&raw_survey()?)?;
//!
//! println!("Removed {} duplicates", result.outcome.stats.duplicates_removed);
//! println!("Wrote {:?}", result.csv_path);
//! ```
//!
//! The stages can also be driven one at a time:
//!
//! ```rust,ignore
//! use survey_cleaning::{CleaningConfig, DataQualityAnalyzer, SurveyCleaner};
//!
//! let config = CleaningConfig::default();
//! let quality = DataQualityAnalyzer::assess(&raw, &config)?;
//! let outcome = SurveyCleaner::new(config).clean(&raw)?;
//! ```

pub mod charts;
pub mod cleaner;
pub mod config;
pub mod dataset;
pub mod error;
pub mod imputers;
pub mod pipeline;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use charts::{ChartData, DashboardRenderer, HistogramBin};
pub use cleaner::{CleaningAction, CleaningOutcome, CleaningStats, CleaningStep, SurveyCleaner};
pub use config::{CleaningConfig, CleaningConfigBuilder, ConfigValidationError};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use imputers::{RangeRepair, StatisticalImputer};
pub use pipeline::{PipelineResult, SurveyPipeline};
pub use quality::DataQualityAnalyzer;
pub use reporting::{CleaningReport, ImprovementSummary, ReportGenerator};
pub use types::{ColumnMissing, QualityReport, SurveyRecord, ValueCount};

static_assertions::assert_impl_all!(QualityReport: Send, Sync);
static_assertions::assert_impl_all!(CleaningReport: Send, Sync);
static_assertions::assert_impl_all!(CleaningError: Send, Sync);
