//! Report generation module.
//!
//! This module persists the cleaned survey as CSV, builds the
//! [`CleaningReport`] used for `--json` and `--emit-report`, and renders the
//! console sections.
//!
//! # Example
//!
//! ```rust,ignore
//! use survey_cleaning::reporting::ReportGenerator;
//!
//! let generator = ReportGenerator::new("output");
//! let csv_path = generator.write_csv(&mut outcome.cleaned, "cleaned_customer_survey.csv")?;
//! let report = ReportGenerator::build_report(&raw_quality, &cleaned_quality, &outcome, Some(&csv_path), None)?;
//! generator.write_report_to_file(&report, "cleaned_customer_survey")?;
//! ```

mod generator;
pub mod summary;

pub use generator::{CleaningReport, ImprovementSummary, REPORT_TITLE, ReportGenerator};
