//! Shared column helpers used by the analyzer, the cleaner and the charts.
//!
//! Survey columns are small and strongly typed, so most helpers copy a
//! column out into a `Vec<Option<_>>`, let the caller map it, and write a
//! freshly built `Series` back with [`replace_column`].

use crate::error::{CleaningError, Result};
use crate::types::ValueCount;
use polars::prelude::*;
use std::collections::HashMap;

/// Borrow a column as a materialized `Series`.
pub fn series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|col| col.as_materialized_series())
        .map_err(|_| CleaningError::ColumnNotFound(name.to_string()))
}

/// Copy a string column out as owned values.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let values = series(df, name)?
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

/// Copy an integer column out.
pub fn i64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    Ok(series(df, name)?.i64()?.into_iter().collect())
}

/// Copy a float column out.
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    Ok(series(df, name)?.f64()?.into_iter().collect())
}

/// Replace a column in place with a newly built `Series` of the same name.
pub fn replace_column(df: &mut DataFrame, name: &str, series: Series) -> Result<()> {
    if df.column(name).is_err() {
        return Err(CleaningError::ColumnNotFound(name.to_string()));
    }
    df.replace(name, series)?;
    Ok(())
}

/// Apply `f` to every non-null value of a string column.
pub fn map_string_column<F>(df: &mut DataFrame, name: &str, f: F) -> Result<()>
where
    F: Fn(&str) -> String,
{
    let mapped: Vec<Option<String>> = string_values(df, name)?
        .into_iter()
        .map(|v| v.map(|s| f(&s)))
        .collect();
    replace_column(df, name, Series::new(name.into(), mapped))
}

/// Fill null values in a string column with a constant. Returns the number
/// of values filled.
pub fn fill_string_nulls(df: &mut DataFrame, name: &str, fill_value: &str) -> Result<usize> {
    let values = string_values(df, name)?;
    let filled = values.iter().filter(|v| v.is_none()).count();
    if filled == 0 {
        return Ok(0);
    }

    let result: Vec<Option<String>> = values
        .into_iter()
        .map(|v| Some(v.unwrap_or_else(|| fill_value.to_string())))
        .collect();
    replace_column(df, name, Series::new(name.into(), result))?;
    Ok(filled)
}

/// Fill null values in a float column with a constant. Returns the number of
/// values filled.
pub fn fill_numeric_nulls(df: &mut DataFrame, name: &str, fill_value: f64) -> Result<usize> {
    let values = f64_values(df, name)?;
    let filled = values.iter().filter(|v| v.is_none()).count();
    if filled == 0 {
        return Ok(0);
    }

    let result: Vec<Option<f64>> = values
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();
    replace_column(df, name, Series::new(name.into(), result))?;
    Ok(filled)
}

/// Total null count across every column.
pub fn total_nulls(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|col| col.null_count()).sum()
}

/// Distinct non-null values in first-appearance order.
pub fn unique_in_order(values: &[Option<String>]) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values.iter().flatten() {
        if !seen.contains(value) {
            seen.push(value.clone());
        }
    }
    seen
}

/// Count non-null values, most frequent first; ties are ordered by value.
pub fn value_counts(values: &[Option<String>]) -> Vec<ValueCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values.iter().flatten() {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }

    let mut sorted: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    sorted
}

/// Sorted distinct non-null integers.
pub fn sorted_unique_i64(values: &[Option<i64>]) -> Vec<i64> {
    let mut out: Vec<i64> = values.iter().flatten().copied().collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Minimum and maximum of the non-null integers.
pub fn min_max_i64(values: &[Option<i64>]) -> Option<(i64, i64)> {
    let mut iter = values.iter().flatten().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn frame() -> DataFrame {
        df![
            "name" => [Some(" a "), None, Some("b")],
            "amount" => [Some(1.0), None, Some(3.0)],
            "age" => [10i64, 20, 30],
        ]
        .unwrap()
    }

    #[test]
    fn test_series_missing_column() {
        let df = frame();
        let err = series(&df, "nope").unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_fill_string_nulls() {
        let mut df = frame();
        let filled = fill_string_nulls(&mut df, "name", "Unknown").unwrap();
        assert_eq!(filled, 1);
        assert_eq!(
            string_values(&df, "name").unwrap(),
            vec![Some(" a ".to_string()), Some("Unknown".to_string()), Some("b".to_string())]
        );
    }

    #[test]
    fn test_fill_numeric_nulls() {
        let mut df = frame();
        assert_eq!(fill_numeric_nulls(&mut df, "amount", 2.0).unwrap(), 1);
        assert_eq!(
            f64_values(&df, "amount").unwrap(),
            vec![Some(1.0), Some(2.0), Some(3.0)]
        );
        // Second pass has nothing to do.
        assert_eq!(fill_numeric_nulls(&mut df, "amount", 9.0).unwrap(), 0);
    }

    #[test]
    fn test_map_string_column_keeps_nulls() {
        let mut df = frame();
        map_string_column(&mut df, "name", |s| s.trim().to_uppercase()).unwrap();
        assert_eq!(
            string_values(&df, "name").unwrap(),
            vec![Some("A".to_string()), None, Some("B".to_string())]
        );
    }

    #[test]
    fn test_value_counts_ordering() {
        let values: Vec<Option<String>> = ["No", "Yes", "Yes", "No", "Maybe"]
            .iter()
            .map(|s| Some(s.to_string()))
            .collect();
        let counts = value_counts(&values);
        let order: Vec<&str> = counts.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(order, vec!["No", "Yes", "Maybe"]);
        assert_eq!(counts[0].count, 2);
    }

    #[test]
    fn test_unique_in_order() {
        let values = vec![
            Some("b".to_string()),
            None,
            Some("a".to_string()),
            Some("b".to_string()),
        ];
        assert_eq!(unique_in_order(&values), vec!["b", "a"]);
    }

    #[test]
    fn test_min_max_and_sorted_unique() {
        let values = vec![Some(5), None, Some(-2), Some(5), Some(9)];
        assert_eq!(min_max_i64(&values), Some((-2, 9)));
        assert_eq!(sorted_unique_i64(&values), vec![-2, 5, 9]);
        assert_eq!(min_max_i64(&[None]), None);
    }

    #[test]
    fn test_total_nulls() {
        assert_eq!(total_nulls(&frame()), 2);
    }
}
