//! Value normalization for raw exam files

use regex::Regex;
use std::sync::LazyLock;

static DIGIT_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)([A-Z])").expect("valid digit-letter regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Normalize a section label to the `"61 A"` form.
///
/// `"67_A"`, `"67A"` and `"67 A"` all become `"67 A"`.
#[must_use]
pub fn standardize_section(section: &str) -> String {
    let cleaned = section.trim().replace('_', " ");
    let cleaned = DIGIT_LETTER.replace_all(&cleaned, "$1 $2");
    let cleaned = WHITESPACE.replace_all(&cleaned, " ");
    cleaned.to_uppercase()
}

/// `"61-A"` -> `"61 A"`
#[must_use]
pub fn hyphens_to_spaces(section: &str) -> String {
    section.replace('-', " ")
}

/// Zero-pad day and month of a `D-M-YYYY` date.
/// Anything that is not three dash-separated parts is returned unchanged.
#[must_use]
pub fn standardize_date(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [day, month, year] => format!("{day:0>2}-{month:0>2}-{year}"),
        _ => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardize_section_forms() {
        assert_eq!(standardize_section("67_A"), "67 A");
        assert_eq!(standardize_section("67A"), "67 A");
        assert_eq!(standardize_section(" 67   A "), "67 A");
        assert_eq!(standardize_section("61_b"), "61 B");
        assert_eq!(standardize_section(""), "");
    }

    #[test]
    fn test_lowercase_letter_is_not_split() {
        // only uppercase letters are separated before uppercasing
        assert_eq!(standardize_section("67a"), "67A");
    }

    #[test]
    fn test_hyphens_to_spaces() {
        assert_eq!(hyphens_to_spaces("61-A"), "61 A");
        assert_eq!(hyphens_to_spaces("Retake"), "Retake");
    }

    #[test]
    fn test_standardize_date() {
        assert_eq!(standardize_date("1-7-2025"), "01-07-2025");
        assert_eq!(standardize_date("01-07-2025"), "01-07-2025");
        assert_eq!(standardize_date("TBA"), "TBA");
        assert_eq!(standardize_date(""), "");
    }
}
