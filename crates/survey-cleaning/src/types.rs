use serde::{Deserialize, Serialize};

/// Column names in the order they appear in the dataset and the CSV output.
pub mod columns {
    pub const CUSTOMER_ID: &str = "customer_id";
    pub const NAME: &str = "name";
    pub const AGE: &str = "age";
    pub const EMAIL: &str = "email";
    pub const SURVEY_DATE: &str = "survey_date";
    pub const SATISFACTION_RATING: &str = "satisfaction_rating";
    pub const PRODUCT_CATEGORY: &str = "product_category";
    pub const PURCHASE_AMOUNT: &str = "purchase_amount";
    pub const WOULD_RECOMMEND: &str = "would_recommend";
    pub const COMMENTS: &str = "comments";

    pub const ALL: [&str; 10] = [
        CUSTOMER_ID,
        NAME,
        AGE,
        EMAIL,
        SURVEY_DATE,
        SATISFACTION_RATING,
        PRODUCT_CATEGORY,
        PURCHASE_AMOUNT,
        WOULD_RECOMMEND,
        COMMENTS,
    ];
}

/// One row of the customer survey.
///
/// `customer_id` is not a key: exact duplicate rows share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub customer_id: i64,
    pub name: Option<String>,
    pub age: i64,
    pub email: Option<String>,
    pub survey_date: String,
    pub satisfaction_rating: i64,
    pub product_category: String,
    pub purchase_amount: Option<f64>,
    pub would_recommend: String,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub column: String,
    pub missing_count: usize,
}

/// Data-quality counts for one snapshot of the survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub shape: (usize, usize),
    /// Per-column null counts, in column order.
    pub missing_values: Vec<ColumnMissing>,
    pub total_missing: usize,
    /// Rows that exactly repeat an earlier row.
    pub duplicate_rows: usize,
    pub negative_ages: usize,
    pub ages_above_max: usize,
    pub invalid_ratings: usize,
    /// Distinct `product_category` spellings in first-appearance order.
    pub category_variants: Vec<String>,
}

impl QualityReport {
    /// Ages outside the valid range on either side.
    pub fn invalid_ages(&self) -> usize {
        self.negative_ages + self.ages_above_max
    }

    /// Null count for a single column (0 for unknown columns).
    pub fn missing_in(&self, column: &str) -> usize {
        self.missing_values
            .iter()
            .find(|m| m.column == column)
            .map(|m| m.missing_count)
            .unwrap_or(0)
    }

    /// Whether the same category appears under more than one casing.
    pub fn has_category_casing_conflicts(&self) -> bool {
        let mut lowered: Vec<String> = self
            .category_variants
            .iter()
            .map(|v| v.trim().to_lowercase())
            .collect();
        lowered.sort();
        lowered.dedup();
        lowered.len() < self.category_variants.len()
    }
}

/// A value and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}
