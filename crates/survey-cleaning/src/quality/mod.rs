//! Data quality assessment module.
//!
//! This module counts the defects the cleaning rules target: missing values,
//! exact duplicate rows, out-of-range ages and ratings, and inconsistent
//! category casing. Assessment never mutates the frame.

mod analyzer;

pub use analyzer::DataQualityAnalyzer;
