use crate::cleaner::{CleaningAction, CleaningOutcome, CleaningStats};
use crate::error::{Result, ResultExt};
use crate::types::{QualityReport, ValueCount, columns};
use crate::utils::{string_values, value_counts};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const REPORT_TITLE: &str = "Data Cleaning Validation - Customer Survey Analysis";

/// Defect counts reported as "fixed" after cleaning.
///
/// These are taken from the raw survey's assessment, not from a comparison
/// of the raw and cleaned frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementSummary {
    pub missing_values_fixed: usize,
    pub invalid_ages_corrected: usize,
    pub invalid_ratings_fixed: usize,
}

impl ImprovementSummary {
    pub fn from_raw(raw_quality: &QualityReport) -> Self {
        Self {
            missing_values_fixed: raw_quality.total_missing,
            invalid_ages_corrected: raw_quality.invalid_ages(),
            invalid_ratings_fixed: raw_quality.invalid_ratings,
        }
    }
}

/// Everything a run produced, for `--json` and `--emit-report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    pub title: String,
    pub original_shape: (usize, usize),
    pub cleaned_shape: (usize, usize),
    pub raw_quality: QualityReport,
    pub cleaned_quality: QualityReport,
    pub improvements: ImprovementSummary,
    pub actions: Vec<CleaningAction>,
    pub stats: CleaningStats,
    /// Product categories after cleaning, most frequent first
    pub category_counts: Vec<ValueCount>,
    /// Recommendation answers after cleaning, most frequent first
    pub recommendation_counts: Vec<ValueCount>,
    /// Path to the cleaned CSV (if written)
    pub csv_file: Option<String>,
    /// Path to the chart image (if rendered)
    pub chart_file: Option<String>,
}

/// Writes the cleaned survey and the JSON report.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write the cleaned frame as CSV with a header row and no index column.
    pub fn write_csv(&self, df: &mut DataFrame, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).context("Creating output directory")?;
        let output_path = self.output_dir.join(file_name);
        let mut file = File::create(&output_path).context("Creating CSV file")?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)
            .context("Writing CSV")?;

        info!("Cleaned dataset saved: {}", output_path.display());
        Ok(output_path)
    }

    /// Build the report from the raw and cleaned assessments.
    pub fn build_report(
        raw_quality: &QualityReport,
        cleaned_quality: &QualityReport,
        outcome: &CleaningOutcome,
        csv_file: Option<&Path>,
        chart_file: Option<&Path>,
    ) -> Result<CleaningReport> {
        let cleaned = &outcome.cleaned;

        Ok(CleaningReport {
            generated_at: Local::now().to_rfc3339(),
            title: REPORT_TITLE.to_string(),
            original_shape: raw_quality.shape,
            cleaned_shape: cleaned.shape(),
            raw_quality: raw_quality.clone(),
            cleaned_quality: cleaned_quality.clone(),
            improvements: ImprovementSummary::from_raw(raw_quality),
            actions: outcome.actions.clone(),
            stats: outcome.stats.clone(),
            category_counts: value_counts(&string_values(cleaned, columns::PRODUCT_CATEGORY)?),
            recommendation_counts: value_counts(&string_values(
                cleaned,
                columns::WOULD_RECOMMEND,
            )?),
            csv_file: csv_file.map(|p| p.display().to_string()),
            chart_file: chart_file.map(|p| p.display().to_string()),
        })
    }

    /// Write the report as pretty JSON to `<base_name>_report.json`.
    pub fn write_report_to_file(&self, report: &CleaningReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).context("Creating output directory")?;

        let report_path = self.output_dir.join(format!("{}_report.json", base_name));
        let mut file = File::create(&report_path).context("Creating report file")?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())
            .context("Writing report")?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::SurveyCleaner;
    use crate::config::CleaningConfig;
    use crate::dataset::raw_survey;
    use crate::quality::DataQualityAnalyzer;
    use pretty_assertions::assert_eq;

    fn outcome_and_quality() -> (QualityReport, QualityReport, CleaningOutcome) {
        let config = CleaningConfig::default();
        let raw = raw_survey().unwrap();
        let raw_quality = DataQualityAnalyzer::assess(&raw, &config).unwrap();
        let outcome = SurveyCleaner::new(config.clone()).clean(&raw).unwrap();
        let cleaned_quality = DataQualityAnalyzer::assess(&outcome.cleaned, &config).unwrap();
        (raw_quality, cleaned_quality, outcome)
    }

    #[test]
    fn test_improvements_come_from_raw_counts() {
        let (raw_quality, cleaned_quality, outcome) = outcome_and_quality();
        let report =
            ReportGenerator::build_report(&raw_quality, &cleaned_quality, &outcome, None, None)
                .unwrap();

        assert_eq!(
            report.improvements,
            ImprovementSummary {
                missing_values_fixed: 5,
                invalid_ages_corrected: 4,
                invalid_ratings_fixed: 3,
            }
        );
        assert_eq!(report.cleaned_quality.invalid_ages(), 0);
        assert_eq!(report.original_shape, (10, 10));
        assert_eq!(report.cleaned_shape, (8, 10));
    }

    #[test]
    fn test_report_value_counts() {
        let (raw_quality, cleaned_quality, outcome) = outcome_and_quality();
        let report =
            ReportGenerator::build_report(&raw_quality, &cleaned_quality, &outcome, None, None)
                .unwrap();

        assert_eq!(report.category_counts.len(), 4);
        assert!(report.category_counts.iter().all(|c| c.count == 2));
        let answers: Vec<&str> = report
            .recommendation_counts
            .iter()
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(answers, vec!["No", "Yes"]);
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let (_, _, mut outcome) = outcome_and_quality();
        let dir = tempfile::tempdir().unwrap();
        let generator = ReportGenerator::new(dir.path());

        let path = generator
            .write_csv(&mut outcome.cleaned, "cleaned.csv")
            .unwrap();
        let content = fs::read_to_string(path).unwrap();
        let mut lines = content.lines();

        assert_eq!(lines.next().unwrap(), columns::ALL.join(","));
        let first = lines.next().unwrap();
        assert!(first.starts_with("1,John Smith,25,john@email.com,2024-01-15,5,Electronics,"));
        assert_eq!(content.lines().count(), 9);
    }

    #[test]
    fn test_write_report_to_file() {
        let (raw_quality, cleaned_quality, outcome) = outcome_and_quality();
        let report =
            ReportGenerator::build_report(&raw_quality, &cleaned_quality, &outcome, None, None)
                .unwrap();
        let dir = tempfile::tempdir().unwrap();

        let path = ReportGenerator::new(dir.path())
            .write_report_to_file(&report, "cleaned_customer_survey")
            .unwrap();

        assert!(path.ends_with("cleaned_customer_survey_report.json"));
        let parsed: CleaningReport =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed.title, REPORT_TITLE);
        assert_eq!(parsed.stats.duplicates_removed, 2);
    }
}
