//! The raw customer survey and its conversion into a Polars `DataFrame`.
//!
//! The survey is a fixed literal. It deliberately carries the defects the
//! cleaning rules target: exact duplicate rows, nulls, out-of-range ages and
//! ratings, inconsistent casing and padding, and mixed date formats.

use crate::error::Result;
use crate::types::{SurveyRecord, columns};
use polars::prelude::*;
use tracing::debug;

/// Number of leading rows that form the canonical six-row sample.
pub const SAMPLE_ROWS: usize = 6;

#[allow(clippy::too_many_arguments)]
fn record(
    customer_id: i64,
    name: Option<&str>,
    age: i64,
    email: Option<&str>,
    survey_date: &str,
    satisfaction_rating: i64,
    product_category: &str,
    purchase_amount: Option<f64>,
    would_recommend: &str,
    comments: Option<&str>,
) -> SurveyRecord {
    SurveyRecord {
        customer_id,
        name: name.map(str::to_string),
        age,
        email: email.map(str::to_string),
        survey_date: survey_date.to_string(),
        satisfaction_rating,
        product_category: product_category.to_string(),
        purchase_amount,
        would_recommend: would_recommend.to_string(),
        comments: comments.map(str::to_string),
    }
}

/// The full ten-row raw survey.
pub fn raw_survey_records() -> Vec<SurveyRecord> {
    let john = record(
        1,
        Some("John Smith"),
        25,
        Some("john@email.com"),
        "2024-01-15",
        5,
        "electronics",
        Some(299.99),
        "Yes",
        Some("Great product!"),
    );
    let alice = record(
        4,
        Some("Alice Brown"),
        -5,
        Some("alice@email.com"),
        "17-01-2024",
        6,
        "home & garden",
        Some(450.00),
        "NO",
        Some("Poor delivery"),
    );

    vec![
        john.clone(),
        record(
            2,
            Some(" jane doe "),
            150,
            Some("JANE@EMAIL.COM"),
            "01/16/2024",
            4,
            "CLOTHING",
            Some(89.50),
            "yes",
            Some("  Good quality  "),
        ),
        john,
        record(
            3,
            Some("Bob Johnson"),
            30,
            Some(""),
            "2024-01-17",
            3,
            "Books",
            Some(25.00),
            "Maybe",
            Some(""),
        ),
        alice.clone(),
        record(
            5,
            Some(""),
            35,
            Some("test@email.com"),
            "2024/01/18",
            2,
            "Clothing",
            None,
            "Yes",
            Some(""),
        ),
        record(6, None, 42, None, "2024-01-19", 0, " books ", Some(15.75), "maybe", None),
        record(
            7,
            Some("carlos RUIZ"),
            200,
            Some("Carlos@Email.com "),
            "01/20/2024",
            5,
            "ELECTRONICS",
            None,
            "no",
            Some("Fast shipping  "),
        ),
        record(
            8,
            Some("dana lee"),
            28,
            Some("dana@email.com"),
            "Jan 21 2024",
            4,
            "Home & Garden",
            Some(120.00),
            "YES",
            Some("Okay"),
        ),
        alice,
    ]
}

/// The canonical six-row sample (the first rows of the raw survey).
pub fn sample_survey_records() -> Vec<SurveyRecord> {
    raw_survey_records().into_iter().take(SAMPLE_ROWS).collect()
}

/// Build a `DataFrame` with one column per survey field, in column order.
pub fn records_to_dataframe(records: &[SurveyRecord]) -> Result<DataFrame> {
    let df = df![
        columns::CUSTOMER_ID => records.iter().map(|r| r.customer_id).collect::<Vec<i64>>(),
        columns::NAME => records.iter().map(|r| r.name.clone()).collect::<Vec<Option<String>>>(),
        columns::AGE => records.iter().map(|r| r.age).collect::<Vec<i64>>(),
        columns::EMAIL => records.iter().map(|r| r.email.clone()).collect::<Vec<Option<String>>>(),
        columns::SURVEY_DATE => records.iter().map(|r| r.survey_date.clone()).collect::<Vec<String>>(),
        columns::SATISFACTION_RATING => records.iter().map(|r| r.satisfaction_rating).collect::<Vec<i64>>(),
        columns::PRODUCT_CATEGORY => records.iter().map(|r| r.product_category.clone()).collect::<Vec<String>>(),
        columns::PURCHASE_AMOUNT => records.iter().map(|r| r.purchase_amount).collect::<Vec<Option<f64>>>(),
        columns::WOULD_RECOMMEND => records.iter().map(|r| r.would_recommend.clone()).collect::<Vec<String>>(),
        columns::COMMENTS => records.iter().map(|r| r.comments.clone()).collect::<Vec<Option<String>>>(),
    ]?;

    debug!("Built survey frame with shape {:?}", df.shape());
    Ok(df)
}

/// The raw survey as a `DataFrame`.
pub fn raw_survey() -> Result<DataFrame> {
    records_to_dataframe(&raw_survey_records())
}
