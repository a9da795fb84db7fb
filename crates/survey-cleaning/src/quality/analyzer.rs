use crate::config::CleaningConfig;
use crate::error::Result;
use crate::types::{ColumnMissing, QualityReport, columns};
use crate::utils::{i64_values, string_values, unique_in_order};
use polars::prelude::*;
use tracing::debug;

pub struct DataQualityAnalyzer;

impl DataQualityAnalyzer {
    /// Count every defect class in `df` against the bounds in `config`.
    pub fn assess(df: &DataFrame, config: &CleaningConfig) -> Result<QualityReport> {
        let missing_values = Self::missing_values(df);
        let total_missing = missing_values.iter().map(|m| m.missing_count).sum();

        let ages = i64_values(df, columns::AGE)?;
        let negative_ages = ages.iter().flatten().filter(|&&a| a < config.min_age).count();
        let ages_above_max = ages.iter().flatten().filter(|&&a| a > config.max_age).count();

        let ratings = i64_values(df, columns::SATISFACTION_RATING)?;
        let invalid_ratings = ratings
            .iter()
            .flatten()
            .filter(|&&r| r < config.min_rating || r > config.max_rating)
            .count();

        let category_variants = unique_in_order(&string_values(df, columns::PRODUCT_CATEGORY)?);

        let report = QualityReport {
            shape: df.shape(),
            missing_values,
            total_missing,
            duplicate_rows: Self::duplicate_rows(df)?,
            negative_ages,
            ages_above_max,
            invalid_ratings,
            category_variants,
        };

        debug!(
            "Assessed {:?}: {} missing, {} duplicates, {} invalid ages, {} invalid ratings",
            report.shape,
            report.total_missing,
            report.duplicate_rows,
            report.invalid_ages(),
            report.invalid_ratings
        );

        Ok(report)
    }

    /// Null count per column, in column order.
    pub fn missing_values(df: &DataFrame) -> Vec<ColumnMissing> {
        df.get_columns()
            .iter()
            .map(|col| ColumnMissing {
                column: col.name().to_string(),
                missing_count: col.null_count(),
            })
            .collect()
    }

    /// Rows whose every field equals an earlier row's.
    pub fn duplicate_rows(df: &DataFrame) -> Result<usize> {
        let unique = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        Ok(df.height() - unique.height())
    }
}
