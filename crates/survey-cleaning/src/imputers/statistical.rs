//! Median-based imputation.
//!
//! Medians are always computed from the column as it stands at the moment the
//! imputer runs, so callers control which rows are eligible by ordering the
//! steps (deduplication first, placeholder filling before age repair).

use crate::error::Result;
use crate::utils::{fill_numeric_nulls, i64_values, replace_column, series};
use polars::prelude::*;
use tracing::{debug, warn};

/// Result of replacing invalid integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRepair {
    /// Invalid values were replaced by the median of the valid ones.
    Median { median: i64, replaced: usize },
    /// No valid value existed; invalid values were clamped to the bounds.
    Clamped { replaced: usize },
}

impl RangeRepair {
    pub fn replaced(&self) -> usize {
        match self {
            Self::Median { replaced, .. } | Self::Clamped { replaced } => *replaced,
        }
    }
}

/// Statistical imputation methods for filling missing or invalid values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Median of the values of `column` lying in `[min, max]`, `None` when
    /// there are none. An even count averages the two middle values.
    pub fn median_in_range(column: &Series, min: i64, max: i64) -> Result<Option<f64>> {
        let mask = column.gt_eq(min)? & column.lt_eq(max)?;
        Ok(column.filter(&mask)?.median())
    }

    /// Fill nulls in a float column with the column median.
    ///
    /// Returns the median used and the number of values filled, or `None`
    /// when the column has no known value to take a median from.
    pub fn apply_numeric_median(df: &mut DataFrame, col_name: &str) -> Result<Option<(f64, usize)>> {
        let Some(median) = series(df, col_name)?.median() else {
            warn!("'{}' has no known values; leaving nulls in place", col_name);
            return Ok(None);
        };

        let filled = fill_numeric_nulls(df, col_name, median)?;
        debug!("Filled {} null(s) in '{}' with median {:.2}", filled, col_name, median);
        Ok(Some((median, filled)))
    }

    /// Replace integers outside `[min, max]` with the (rounded) median of the
    /// values inside it.
    ///
    /// When no value is inside the range there is no median to use, and the
    /// invalid values are clamped to the nearest bound instead. Either way
    /// every value ends up inside the range.
    pub fn repair_out_of_range(
        df: &mut DataFrame,
        col_name: &str,
        min: i64,
        max: i64,
    ) -> Result<RangeRepair> {
        let values = i64_values(df, col_name)?;
        let is_invalid = |v: i64| v < min || v > max;
        let replaced = values.iter().flatten().filter(|&&v| is_invalid(v)).count();

        let repair = match Self::median_in_range(series(df, col_name)?, min, max)? {
            Some(median) => RangeRepair::Median {
                median: median.round() as i64,
                replaced,
            },
            None => {
                warn!(
                    "'{}' has no values in [{}, {}]; clamping instead of median repair",
                    col_name, min, max
                );
                RangeRepair::Clamped { replaced }
            }
        };

        let replacement = |v: i64| match repair {
            RangeRepair::Median { median, .. } => median,
            RangeRepair::Clamped { .. } => v.clamp(min, max),
        };

        if replaced > 0 {
            let repaired: Vec<Option<i64>> = values
                .into_iter()
                .map(|v| v.map(|v| if is_invalid(v) { replacement(v) } else { v }))
                .collect();
            replace_column(df, col_name, Series::new(col_name.into(), repaired))?;
        }

        Ok(repair)
    }
}
