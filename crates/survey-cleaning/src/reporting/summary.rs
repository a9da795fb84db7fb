//! Human-readable console sections.
//!
//! Each function renders one block of the run's console output into a
//! `String`; the binary decides when to print them.

use crate::cleaner::CleaningStats;
use crate::config::CleaningConfig;
use crate::reporting::{CleaningReport, ImprovementSummary};
use crate::types::{QualityReport, ValueCount};
use std::fmt::Write;

fn banner(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n=== {} ===", title);
}

fn quoted_list<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn range_text(range: Option<(i64, i64)>) -> String {
    match range {
        Some((min, max)) => format!("Min: {}, Max: {}", min, max),
        None => "no values".to_string(),
    }
}

/// The pre-cleaning quality assessment block.
pub fn render_quality_assessment(report: &QualityReport, config: &CleaningConfig) -> String {
    let mut out = String::new();
    banner(&mut out, "DATA QUALITY ASSESSMENT");

    let _ = writeln!(out, "Missing values per column:");
    for missing in &report.missing_values {
        let _ = writeln!(out, "  {:<22}{}", missing.column, missing.missing_count);
    }

    let _ = writeln!(out, "\nDuplicate rows found: {}", report.duplicate_rows);

    let _ = writeln!(out, "\nAge data issues:");
    let _ = writeln!(out, "- Negative ages: {}", report.negative_ages);
    let _ = writeln!(
        out,
        "- Unrealistic ages (>{}): {}",
        config.max_age, report.ages_above_max
    );

    let _ = writeln!(
        out,
        "\nInvalid satisfaction ratings: {}",
        report.invalid_ratings
    );

    let _ = writeln!(out, "\nProduct category variants:");
    let _ = writeln!(out, "  [{}]", quoted_list(&report.category_variants));
    if report.has_category_casing_conflicts() {
        let _ = writeln!(out, "  ^ the same category appears with different casing");
    }

    out
}

/// One block per cleaning step, numbered in execution order.
pub fn render_cleaning_steps(stats: &CleaningStats, config: &CleaningConfig) -> String {
    let mut out = String::new();
    banner(&mut out, "STARTING DATA CLEANING PROCESS");

    let _ = writeln!(out, "\n1. Removing Duplicate Records:");
    let _ = writeln!(
        out,
        "   Removed {} duplicate row(s)",
        stats.duplicates_removed
    );

    let _ = writeln!(out, "\n2. Handling Missing Values:");
    match stats.purchase_median {
        Some(median) => {
            let _ = writeln!(
                out,
                "   Filled missing purchase amounts with median: ${}",
                median
            );
        }
        None => {
            let _ = writeln!(out, "   No known purchase amounts; left missing values in place");
        }
    }
    let _ = writeln!(
        out,
        "   Filled missing names and emails with placeholders ('{}', '{}')",
        config.unknown_name, config.unknown_email
    );
    let _ = writeln!(
        out,
        "   Total missing values remaining: {}",
        stats.missing_remaining
    );

    let _ = writeln!(out, "\n3. Correcting Invalid Age Data:");
    let _ = writeln!(
        out,
        "   Ages before cleaning - {}",
        range_text(stats.age_range_before)
    );
    let _ = writeln!(
        out,
        "   Ages after cleaning - {}",
        range_text(stats.age_range_after)
    );

    let _ = writeln!(out, "\n4. Correcting Satisfaction Ratings:");
    let _ = writeln!(out, "   Ratings before: {:?}", stats.ratings_before);
    let _ = writeln!(out, "   Ratings after: {:?}", stats.ratings_after);

    let _ = writeln!(out, "\n5. Standardizing Text Formatting:");
    let _ = writeln!(out, "   Standardized customer names");
    let _ = writeln!(out, "   Standardized email formatting");
    let _ = writeln!(out, "   Standardized product categories");
    let _ = writeln!(out, "   Standardized recommendation responses");

    let _ = writeln!(out, "\n6. Standardizing Date Formats:");
    let _ = writeln!(out, "   Original date formats: [{}]", quoted_list(&stats.raw_dates));
    if stats.unparsed_dates == 0 {
        let _ = writeln!(out, "   All dates converted to standard YYYY-MM-DD format");
    } else {
        let _ = writeln!(
            out,
            "   Dates converted to YYYY-MM-DD; {} unrecognized value(s) left empty",
            stats.unparsed_dates
        );
    }

    out
}

/// The results block. Improvement counts come from the raw assessment.
pub fn render_results(report: &CleaningReport) -> String {
    let mut out = String::new();
    banner(&mut out, "DATA CLEANING RESULTS");

    let ImprovementSummary {
        missing_values_fixed,
        invalid_ages_corrected,
        invalid_ratings_fixed,
    } = report.improvements;

    let _ = writeln!(
        out,
        "Original dataset: {} rows, {} columns",
        report.original_shape.0, report.original_shape.1
    );
    let _ = writeln!(
        out,
        "Cleaned dataset: {} rows, {} columns",
        report.cleaned_shape.0, report.cleaned_shape.1
    );
    let _ = writeln!(out, "Data quality improvements made:");
    let _ = writeln!(out, "   - Fixed {} missing values", missing_values_fixed);
    let _ = writeln!(out, "   - Corrected {} invalid ages", invalid_ages_corrected);
    let _ = writeln!(out, "   - Fixed {} invalid ratings", invalid_ratings_fixed);
    let _ = writeln!(out, "   - Standardized all text formatting");
    let _ = writeln!(out, "   - Unified date formats");

    out
}

/// Value counts, one `value  count` line each.
pub fn render_value_counts(title: &str, counts: &[ValueCount]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}:", title);
    let width = counts.iter().map(|c| c.value.len()).max().unwrap_or(0) + 2;
    for count in counts {
        let _ = writeln!(out, "  {:<width$}{}", count.value, count.count, width = width);
    }
    out
}
