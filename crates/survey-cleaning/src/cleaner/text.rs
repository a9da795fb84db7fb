//! Text normalization rules.
//!
//! For text whose case mappings are one character to one character (every
//! survey value is), applying a rule to its own output returns the same
//! string. Characters that expand when upper-cased, such as "ß" to "SS", are
//! not stable under repeated title-casing.

/// Capitalize the first letter of every word and lower-case the rest.
///
/// A letter starts a word when the character before it is not a letter, so
/// "home & garden" becomes "Home & Garden" and "o'neil" becomes "O'Neil".
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_is_letter = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}

/// Trim and title-case. Used for names and product categories.
pub fn normalize_title(value: &str) -> String {
    title_case(value.trim())
}

/// Trim and lower-case.
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Trim only; comments keep their casing.
pub fn normalize_comment(value: &str) -> String {
    value.trim().to_string()
}

/// Trim, title-case, then fold the undecided answer into "No".
pub fn normalize_recommendation(value: &str) -> String {
    let titled = normalize_title(value);
    if titled == "Maybe" {
        "No".to_string()
    } else {
        titled
    }
}
