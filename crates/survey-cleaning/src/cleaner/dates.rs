//! Survey date recognition and ISO normalization.
//!
//! Four layouts occur in the survey. Each is recognized by its shape first so
//! that an ambiguous string is never parsed under the wrong layout, then
//! parsed with chrono. Anything else becomes null instead of failing.

use crate::error::Result;
use crate::utils::{replace_column, string_values};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A recognized survey date layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateLayout {
    /// `YYYY-MM-DD`
    Iso,
    /// `MM/DD/YYYY`
    UsSlash,
    /// `YYYY/MM/DD`
    YearFirstSlash,
    /// `DD-MM-YYYY`
    DayFirstDash,
}

impl DateLayout {
    pub fn chrono_format(&self) -> &'static str {
        match self {
            Self::Iso => "%Y-%m-%d",
            Self::UsSlash => "%m/%d/%Y",
            Self::YearFirstSlash => "%Y/%m/%d",
            Self::DayFirstDash => "%d-%m-%Y",
        }
    }
}

static DATE_LAYOUTS: Lazy<Vec<(DateLayout, Regex)>> = Lazy::new(|| {
    vec![
        (
            DateLayout::Iso,
            Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").expect("Invalid regex: YYYY-MM-DD"),
        ),
        (
            DateLayout::UsSlash,
            Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("Invalid regex: MM/DD/YYYY"),
        ),
        (
            DateLayout::YearFirstSlash,
            Regex::new(r"^\d{4}/\d{1,2}/\d{1,2}$").expect("Invalid regex: YYYY/MM/DD"),
        ),
        (
            DateLayout::DayFirstDash,
            Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$").expect("Invalid regex: DD-MM-YYYY"),
        ),
    ]
});

/// Parse a raw survey date under the first layout whose shape matches.
pub fn parse_survey_date(raw: &str) -> Option<(NaiveDate, DateLayout)> {
    let trimmed = raw.trim();
    DATE_LAYOUTS
        .iter()
        .find(|(_, pattern)| pattern.is_match(trimmed))
        .and_then(|(layout, _)| {
            NaiveDate::parse_from_str(trimmed, layout.chrono_format())
                .ok()
                .map(|date| (date, *layout))
        })
}

/// Re-emit a raw survey date as `YYYY-MM-DD`, or `None` if unrecognized.
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_survey_date(raw).map(|(date, _)| date.format("%Y-%m-%d").to_string())
}

/// Days since 1970-01-01, the physical representation of a Polars `Date`.
fn epoch_days(date: NaiveDate) -> i32 {
    date.signed_duration_since(NaiveDate::default()).num_days() as i32
}

/// Convert a string date column into a Polars `Date` column.
///
/// Returns the number of non-null values that could not be parsed; those
/// become nulls.
pub fn normalize_date_column(df: &mut DataFrame, col_name: &str) -> Result<usize> {
    let raw = string_values(df, col_name)?;
    let mut unparsed = 0;

    let days: Vec<Option<i32>> = raw
        .iter()
        .map(|value| {
            let value = value.as_deref()?;
            match parse_survey_date(value) {
                Some((date, _)) => Some(epoch_days(date)),
                None => {
                    debug!("Unrecognized survey date '{}'", value);
                    unparsed += 1;
                    None
                }
            }
        })
        .collect();

    let dates = Series::new(col_name.into(), days).cast(&DataType::Date)?;
    replace_column(df, col_name, dates)?;
    Ok(unparsed)
}

/// Render a `Date` (or string) column as ISO strings.
pub fn iso_strings(series: &Series) -> Result<Vec<Option<String>>> {
    let as_text = series.cast(&DataType::String)?;
    Ok(as_text
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}
