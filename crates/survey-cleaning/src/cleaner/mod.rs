//! Survey cleaning module.
//!
//! [`SurveyCleaner::clean`] derives a new frame from the raw survey by
//! applying seven rules in a fixed order:
//!
//! 1. Drop exact duplicate rows (first occurrence kept)
//! 2. Fill missing purchase amounts with the median amount
//! 3. Fill missing names and emails with placeholders
//! 4. Replace out-of-range ages with the median valid age
//! 5. Clamp satisfaction ratings into range
//! 6. Trim and re-case the text columns
//! 7. Re-emit survey dates as ISO dates
//!
//! The order matters: each median is taken from the frame as the previous
//! steps left it. No step aborts on bad data; unrecognized dates become
//! nulls and are counted.

pub mod dates;
pub mod text;

use crate::config::CleaningConfig;
use crate::error::{Result, ResultExt};
use crate::imputers::{RangeRepair, StatisticalImputer};
use crate::types::columns;
use crate::utils::{
    fill_string_nulls, i64_values, map_string_column, min_max_i64, replace_column,
    sorted_unique_i64, string_values, total_nulls, unique_in_order,
};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The cleaning rules, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStep {
    Deduplicate,
    ImputeNumeric,
    ImputeText,
    RepairAge,
    ClampRating,
    NormalizeText,
    NormalizeDates,
}

impl CleaningStep {
    pub const ALL: [CleaningStep; 7] = [
        Self::Deduplicate,
        Self::ImputeNumeric,
        Self::ImputeText,
        Self::RepairAge,
        Self::ClampRating,
        Self::NormalizeText,
        Self::NormalizeDates,
    ];

    /// Returns a human-readable name for the step.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Deduplicate => "Removing Duplicate Records",
            Self::ImputeNumeric => "Handling Missing Numeric Values",
            Self::ImputeText => "Handling Missing Text Values",
            Self::RepairAge => "Correcting Invalid Age Data",
            Self::ClampRating => "Correcting Satisfaction Ratings",
            Self::NormalizeText => "Standardizing Text Formatting",
            Self::NormalizeDates => "Standardizing Date Formats",
        }
    }
}

/// One line of the cleaning log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningAction {
    pub step: CleaningStep,
    pub message: String,
}

/// What each step changed, for reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningStats {
    pub rows_before: usize,
    pub duplicates_removed: usize,
    /// `None` when every amount was missing and nothing could be filled.
    pub purchase_median: Option<f64>,
    pub purchase_amounts_filled: usize,
    pub names_filled: usize,
    pub emails_filled: usize,
    pub missing_remaining: usize,
    pub age_range_before: Option<(i64, i64)>,
    pub age_range_after: Option<(i64, i64)>,
    /// `None` when no valid age existed and ages were clamped instead.
    pub age_median: Option<i64>,
    pub ages_repaired: usize,
    pub ratings_before: Vec<i64>,
    pub ratings_after: Vec<i64>,
    pub ratings_clamped: usize,
    /// Distinct raw date strings seen before normalization.
    pub raw_dates: Vec<String>,
    pub unparsed_dates: usize,
}

/// The cleaned frame together with the log of what was done.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub cleaned: DataFrame,
    pub actions: Vec<CleaningAction>,
    pub stats: CleaningStats,
}

/// Applies the fixed cleaning rules to a survey frame.
#[derive(Debug, Clone, Default)]
pub struct SurveyCleaner {
    config: CleaningConfig,
}

impl SurveyCleaner {
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    /// Run every cleaning step on a copy of `raw`. `raw` is left untouched.
    pub fn clean(&self, raw: &DataFrame) -> Result<CleaningOutcome> {
        info!("Starting survey cleaning on {} rows", raw.height());

        let mut stats = CleaningStats {
            rows_before: raw.height(),
            ..Default::default()
        };
        let mut actions = Vec::new();
        let mut log = |step: CleaningStep, message: String| {
            debug!("[{}] {}", step.display_name(), message);
            actions.push(CleaningAction { step, message });
        };

        let mut df = Self::remove_duplicates(raw).context("Removing duplicates")?;
        stats.duplicates_removed = raw.height() - df.height();
        log(
            CleaningStep::Deduplicate,
            format!("Removed {} duplicate row(s)", stats.duplicates_removed),
        );

        if let Some((median, filled)) =
            StatisticalImputer::apply_numeric_median(&mut df, columns::PURCHASE_AMOUNT)
                .context("Imputing purchase amounts")?
        {
            stats.purchase_median = Some(median);
            stats.purchase_amounts_filled = filled;
            log(
                CleaningStep::ImputeNumeric,
                format!("Filled {} missing purchase amount(s) with median: ${}", filled, median),
            );
        } else {
            log(
                CleaningStep::ImputeNumeric,
                "No known purchase amounts; missing values left in place".to_string(),
            );
        }

        let (names_filled, emails_filled) = self
            .fill_text_placeholders(&mut df)
            .context("Filling text placeholders")?;
        stats.names_filled = names_filled;
        stats.emails_filled = emails_filled;
        stats.missing_remaining = total_nulls(&df);
        log(
            CleaningStep::ImputeText,
            format!(
                "Filled {} missing name(s) and {} missing email(s) with placeholders",
                names_filled, emails_filled
            ),
        );

        stats.age_range_before = min_max_i64(&i64_values(&df, columns::AGE)?);
        let repair = self.repair_ages(&mut df).context("Repairing ages")?;
        stats.age_range_after = min_max_i64(&i64_values(&df, columns::AGE)?);
        stats.ages_repaired = repair.replaced();
        match repair {
            RangeRepair::Median { median, replaced } => {
                stats.age_median = Some(median);
                log(
                    CleaningStep::RepairAge,
                    format!("Replaced {} invalid age(s) with median valid age {}", replaced, median),
                );
            }
            RangeRepair::Clamped { replaced } => log(
                CleaningStep::RepairAge,
                format!("No valid ages; clamped {} invalid age(s) into range", replaced),
            ),
        }

        stats.ratings_before = sorted_unique_i64(&i64_values(&df, columns::SATISFACTION_RATING)?);
        stats.ratings_clamped = self.clamp_ratings(&mut df).context("Clamping ratings")?;
        stats.ratings_after = sorted_unique_i64(&i64_values(&df, columns::SATISFACTION_RATING)?);
        log(
            CleaningStep::ClampRating,
            format!(
                "Clamped {} rating(s) into [{}, {}]",
                stats.ratings_clamped, self.config.min_rating, self.config.max_rating
            ),
        );

        Self::normalize_text(&mut df).context("Normalizing text")?;
        log(
            CleaningStep::NormalizeText,
            "Standardized names, emails, categories, recommendations and comments".to_string(),
        );

        stats.raw_dates = unique_in_order(&string_values(&df, columns::SURVEY_DATE)?);
        stats.unparsed_dates = dates::normalize_date_column(&mut df, columns::SURVEY_DATE)
            .context("Normalizing dates")?;
        log(
            CleaningStep::NormalizeDates,
            format!(
                "Converted survey dates to YYYY-MM-DD ({} unparsed)",
                stats.unparsed_dates
            ),
        );

        info!(
            "Cleaning complete: {} -> {} rows",
            stats.rows_before,
            df.height()
        );

        Ok(CleaningOutcome {
            cleaned: df,
            actions,
            stats,
        })
    }

    /// Drop rows that exactly repeat an earlier row, preserving order.
    pub fn remove_duplicates(df: &DataFrame) -> Result<DataFrame> {
        Ok(df.unique_stable(None, UniqueKeepStrategy::First, None)?)
    }

    /// Fill missing names and emails. Returns how many of each were filled.
    pub fn fill_text_placeholders(&self, df: &mut DataFrame) -> Result<(usize, usize)> {
        let names = fill_string_nulls(df, columns::NAME, &self.config.unknown_name)?;
        let emails = fill_string_nulls(df, columns::EMAIL, &self.config.unknown_email)?;
        Ok((names, emails))
    }

    /// Replace ages outside the configured range.
    pub fn repair_ages(&self, df: &mut DataFrame) -> Result<RangeRepair> {
        StatisticalImputer::repair_out_of_range(
            df,
            columns::AGE,
            self.config.min_age,
            self.config.max_age,
        )
    }

    /// Clamp ratings into the configured range. Returns how many changed.
    pub fn clamp_ratings(&self, df: &mut DataFrame) -> Result<usize> {
        let (min, max) = (self.config.min_rating, self.config.max_rating);
        let ratings = i64_values(df, columns::SATISFACTION_RATING)?;
        let clamped = ratings
            .iter()
            .flatten()
            .filter(|&&r| r < min || r > max)
            .count();

        if clamped > 0 {
            let fixed: Vec<Option<i64>> = ratings
                .into_iter()
                .map(|r| r.map(|r| r.clamp(min, max)))
                .collect();
            replace_column(
                df,
                columns::SATISFACTION_RATING,
                Series::new(columns::SATISFACTION_RATING.into(), fixed),
            )?;
        }

        Ok(clamped)
    }

    /// Trim and re-case every text column except the survey date.
    pub fn normalize_text(df: &mut DataFrame) -> Result<()> {
        map_string_column(df, columns::NAME, text::normalize_title)?;
        map_string_column(df, columns::EMAIL, text::normalize_email)?;
        map_string_column(df, columns::PRODUCT_CATEGORY, text::normalize_title)?;
        map_string_column(df, columns::WOULD_RECOMMEND, text::normalize_recommendation)?;
        map_string_column(df, columns::COMMENTS, text::normalize_comment)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{raw_survey, records_to_dataframe, sample_survey_records};
    use crate::utils::f64_values;
    use pretty_assertions::assert_eq;

    fn clean_sample() -> CleaningOutcome {
        let raw = records_to_dataframe(&sample_survey_records()).unwrap();
        SurveyCleaner::default().clean(&raw).unwrap()
    }

    fn clean_full() -> CleaningOutcome {
        SurveyCleaner::default().clean(&raw_survey().unwrap()).unwrap()
    }

    #[test]
    fn test_sample_drops_one_duplicate() {
        let outcome = clean_sample();
        assert_eq!(outcome.cleaned.height(), 5);
        assert_eq!(outcome.stats.duplicates_removed, 1);
    }

    #[test]
    fn test_sample_age_median_is_thirty() {
        let outcome = clean_sample();
        assert_eq!(outcome.stats.age_median, Some(30));
        assert_eq!(
            i64_values(&outcome.cleaned, columns::AGE).unwrap(),
            vec![Some(25), Some(30), Some(30), Some(30), Some(35)]
        );
    }

    #[test]
    fn test_sample_purchase_median_uses_four_known_amounts() {
        let outcome = clean_sample();
        let expected = (89.50 + 299.99) / 2.0;
        let median = outcome.stats.purchase_median.unwrap();
        assert!((median - expected).abs() < 1e-9);

        let amounts = f64_values(&outcome.cleaned, columns::PURCHASE_AMOUNT).unwrap();
        assert!((amounts[4].unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sample_categories_have_one_casing() {
        let outcome = clean_sample();
        let categories =
            unique_in_order(&string_values(&outcome.cleaned, columns::PRODUCT_CATEGORY).unwrap());
        assert_eq!(
            categories,
            vec!["Electronics", "Clothing", "Books", "Home & Garden"]
        );
    }

    #[test]
    fn test_ages_and_ratings_in_range() {
        let outcome = clean_full();
        for age in i64_values(&outcome.cleaned, columns::AGE).unwrap().into_iter().flatten() {
            assert!((0..=120).contains(&age), "age {age} out of range");
        }
        for rating in i64_values(&outcome.cleaned, columns::SATISFACTION_RATING)
            .unwrap()
            .into_iter()
            .flatten()
        {
            assert!((1..=5).contains(&rating), "rating {rating} out of range");
        }
        assert_eq!(outcome.stats.ratings_before, vec![0, 2, 3, 4, 5, 6]);
        assert_eq!(outcome.stats.ratings_after, vec![1, 2, 3, 4, 5]);
        assert_eq!(outcome.stats.ratings_clamped, 2);
    }

    #[test]
    fn test_no_maybe_remains() {
        let outcome = clean_full();
        let answers = string_values(&outcome.cleaned, columns::WOULD_RECOMMEND).unwrap();
        assert!(answers.iter().flatten().all(|a| a == "Yes" || a == "No"));
        // Rows for customers 3 ("Maybe") and 6 ("maybe").
        assert_eq!(answers[2].as_deref(), Some("No"));
        assert_eq!(answers[5].as_deref(), Some("No"));
    }

    #[test]
    fn test_placeholders_fill_nulls_only() {
        let outcome = clean_full();
        let names = string_values(&outcome.cleaned, columns::NAME).unwrap();
        let emails = string_values(&outcome.cleaned, columns::EMAIL).unwrap();

        assert_eq!(names[5].as_deref(), Some("Unknown Customer"));
        assert_eq!(emails[5].as_deref(), Some("no_email@unknown.com"));
        // Empty strings are values, they are trimmed but not replaced.
        assert_eq!(names[4].as_deref(), Some(""));
        assert_eq!(emails[2].as_deref(), Some(""));
        assert_eq!(outcome.stats.names_filled, 1);
        assert_eq!(outcome.stats.emails_filled, 1);
    }

    #[test]
    fn test_full_survey_stats() {
        let outcome = clean_full();
        let stats = &outcome.stats;

        assert_eq!(stats.rows_before, 10);
        assert_eq!(stats.duplicates_removed, 2);
        assert_eq!(outcome.cleaned.height(), 8);
        assert_eq!(stats.purchase_median, Some(104.75));
        assert_eq!(stats.purchase_amounts_filled, 2);
        assert_eq!(stats.age_median, Some(30));
        assert_eq!(stats.ages_repaired, 3);
        assert_eq!(stats.age_range_before, Some((-5, 200)));
        assert_eq!(stats.age_range_after, Some((25, 42)));
        assert_eq!(stats.unparsed_dates, 1);
        // Comments are never imputed; customer 6 has none.
        assert_eq!(stats.missing_remaining, 1);
        assert_eq!(outcome.actions.len(), CleaningStep::ALL.len());
    }

    #[test]
    fn test_dates_normalized() {
        let outcome = clean_full();
        let series = outcome
            .cleaned
            .column(columns::SURVEY_DATE)
            .unwrap()
            .as_materialized_series();
        let dates = dates::iso_strings(series).unwrap();

        assert_eq!(dates[1].as_deref(), Some("2024-01-16"));
        assert_eq!(dates[3].as_deref(), Some("2024-01-17"));
        assert_eq!(dates[4].as_deref(), Some("2024-01-18"));
        assert_eq!(dates[7], None);
    }

    #[test]
    fn test_raw_frame_untouched() {
        let raw = raw_survey().unwrap();
        let copy = raw.clone();
        SurveyCleaner::default().clean(&raw).unwrap();
        assert!(raw.equals_missing(&copy));
    }

    #[test]
    fn test_normalize_text_idempotent_on_frame() {
        let mut once = clean_full().cleaned;
        let snapshot = once.clone();
        SurveyCleaner::normalize_text(&mut once).unwrap();
        assert!(once.equals_missing(&snapshot));
    }

    #[test]
    fn test_step_display_names_unique() {
        let mut names: Vec<&str> = CleaningStep::ALL.iter().map(|s| s.display_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), CleaningStep::ALL.len());
    }
}
