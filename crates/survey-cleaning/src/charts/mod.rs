//! Summary charts of the cleaned survey.
//!
//! [`ChartData`] extracts what the four panels plot from the cleaned frame;
//! [`DashboardRenderer`] draws them into a single PNG.

mod render;

pub use render::{DashboardRenderer, Palette};

use crate::config::CleaningConfig;
use crate::error::Result;
use crate::types::{ValueCount, columns};
use crate::utils::{i64_values, string_values, value_counts};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Panel titles, in drawing order (row-major).
pub const PANEL_TITLES: [&str; 4] = [
    "Age Distribution (Post-Cleaning)",
    "Customer Satisfaction Ratings",
    "Product Category Distribution",
    "Customer Recommendation Willingness",
];

/// One histogram bin. The last bin also includes its upper edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram over `[min, max]` of `values`.
///
/// When every value is the same the range is widened to `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lo + width * i as f64,
            upper: lo + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for &value in values {
        let idx = (((value - lo) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }

    out
}

/// The data behind the four panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub age_bins: Vec<HistogramBin>,
    /// `(rating, count)` for every rating in the configured range.
    pub rating_counts: Vec<(i64, usize)>,
    pub category_counts: Vec<ValueCount>,
    pub recommendation_counts: Vec<ValueCount>,
}

impl ChartData {
    pub fn from_frame(df: &DataFrame, config: &CleaningConfig) -> Result<Self> {
        let ages: Vec<f64> = i64_values(df, columns::AGE)?
            .into_iter()
            .flatten()
            .map(|a| a as f64)
            .collect();

        let ratings = i64_values(df, columns::SATISFACTION_RATING)?;
        let rating_counts = (config.min_rating..=config.max_rating)
            .map(|r| (r, ratings.iter().filter(|v| **v == Some(r)).count()))
            .collect();

        Ok(Self {
            age_bins: histogram(&ages, config.age_bins),
            rating_counts,
            category_counts: value_counts(&string_values(df, columns::PRODUCT_CATEGORY)?),
            recommendation_counts: value_counts(&string_values(df, columns::WOULD_RECOMMEND)?),
        })
    }
}
