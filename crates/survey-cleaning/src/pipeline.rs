//! One-shot survey run.
//!
//! [`SurveyPipeline::process`] assesses the raw frame, cleans it, assesses
//! the result, writes the CSV and the chart, and assembles the
//! [`CleaningReport`]. The raw frame is never modified.

use crate::charts::{ChartData, DashboardRenderer};
use crate::cleaner::{CleaningOutcome, SurveyCleaner};
use crate::config::CleaningConfig;
use crate::error::{Result, ResultExt};
use crate::quality::DataQualityAnalyzer;
use crate::reporting::{CleaningReport, ReportGenerator};
use crate::types::QualityReport;
use polars::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub raw_quality: QualityReport,
    pub cleaned_quality: QualityReport,
    pub outcome: CleaningOutcome,
    pub report: CleaningReport,
    /// Path to the cleaned CSV, if it was written
    pub csv_path: Option<PathBuf>,
    /// Path to the chart, if it was rendered
    pub chart_path: Option<PathBuf>,
}

/// Runs assessment, cleaning and output for one survey frame.
///
/// # Example
///
/// ```rust,ignore
/// use survey_cleaning::{CleaningConfig, SurveyPipeline, dataset::raw_survey};
///
/// let result = SurveyPipeline::new(CleaningConfig::default())
///     .render_chart(false)
///     .process(&raw_survey()?)?;
/// println!("{} rows left", result.outcome.cleaned.height());
/// ```
#[derive(Debug, Clone)]
pub struct SurveyPipeline {
    config: CleaningConfig,
    save_to_disk: bool,
    render_chart: bool,
}

static_assertions::assert_impl_all!(SurveyPipeline: Send, Sync);
static_assertions::assert_impl_all!(PipelineResult: Send);

impl SurveyPipeline {
    pub fn new(config: CleaningConfig) -> Self {
        Self {
            config,
            save_to_disk: true,
            render_chart: true,
        }
    }

    /// Write the CSV (and the chart, unless disabled). Default: true
    pub fn save_to_disk(mut self, save: bool) -> Self {
        self.save_to_disk = save;
        self
    }

    /// Render the PNG dashboard when saving to disk. Default: true
    pub fn render_chart(mut self, render: bool) -> Self {
        self.render_chart = render;
        self
    }

    pub fn process(&self, raw: &DataFrame) -> Result<PipelineResult> {
        match self.process_internal(raw) {
            Ok(result) => Ok(result),
            Err(e) => {
                error!("Survey run failed: {}", e);
                Err(e)
            }
        }
    }

    fn process_internal(&self, raw: &DataFrame) -> Result<PipelineResult> {
        let start_time = Instant::now();
        self.config.validate()?;

        let raw_quality =
            DataQualityAnalyzer::assess(raw, &self.config).context("Assessing raw survey")?;

        let mut outcome = SurveyCleaner::new(self.config.clone()).clean(raw)?;

        let cleaned_quality = DataQualityAnalyzer::assess(&outcome.cleaned, &self.config)
            .context("Assessing cleaned survey")?;

        let mut csv_path = None;
        let mut chart_path = None;
        if self.save_to_disk {
            let generator = ReportGenerator::new(&self.config.output_dir);
            csv_path = Some(generator.write_csv(&mut outcome.cleaned, &self.config.csv_name)?);

            if self.render_chart {
                let data = ChartData::from_frame(&outcome.cleaned, &self.config)?;
                let path = self.config.chart_path();
                DashboardRenderer::from_config(&self.config).render_to_file(&data, &path)?;
                chart_path = Some(path);
            }
        }

        let report = ReportGenerator::build_report(
            &raw_quality,
            &cleaned_quality,
            &outcome,
            csv_path.as_deref(),
            chart_path.as_deref(),
        )?;

        info!(
            "Survey run finished in {:.2?}: {:?} -> {:?}",
            start_time.elapsed(),
            report.original_shape,
            report.cleaned_shape
        );

        Ok(PipelineResult {
            raw_quality,
            cleaned_quality,
            outcome,
            report,
            csv_path,
            chart_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigValidationError;
    use crate::dataset::raw_survey;
    use crate::error::CleaningError;

    #[test]
    fn test_process_in_memory() {
        let raw = raw_survey().unwrap();
        let result = SurveyPipeline::new(CleaningConfig::default())
            .save_to_disk(false)
            .process(&raw)
            .unwrap();

        assert_eq!(raw.height(), 10);
        assert_eq!(result.outcome.cleaned.height(), 8);
        assert!(result.csv_path.is_none());
        assert!(result.chart_path.is_none());
        assert_eq!(result.cleaned_quality.duplicate_rows, 0);
    }

    #[test]
    fn test_process_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = CleaningConfig::builder()
            .output_dir(dir.path())
            .chart_size(400, 300)
            .build()
            .unwrap();

        let result = SurveyPipeline::new(config)
            .process(&raw_survey().unwrap())
            .unwrap();

        assert!(result.csv_path.as_ref().unwrap().exists());
        assert!(result.chart_path.as_ref().unwrap().exists());
        assert!(result.report.chart_file.is_some());
    }

    #[test]
    fn test_process_without_chart() {
        let dir = tempfile::tempdir().unwrap();
        let config = CleaningConfig::builder()
            .output_dir(dir.path())
            .build()
            .unwrap();

        let result = SurveyPipeline::new(config)
            .render_chart(false)
            .process(&raw_survey().unwrap())
            .unwrap();

        assert!(result.csv_path.is_some());
        assert!(result.chart_path.is_none());
        assert!(!dir.path().join("data_cleaning_analysis.png").exists());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CleaningConfig {
            age_bins: 0,
            ..Default::default()
        };
        let err = SurveyPipeline::new(config)
            .save_to_disk(false)
            .process(&raw_survey().unwrap())
            .unwrap_err();

        assert!(matches!(err, CleaningError::InvalidConfig(_)));
        assert_eq!(
            err.to_string(),
            CleaningError::from(ConfigValidationError::InvalidAgeBins(0)).to_string()
        );
    }
}
