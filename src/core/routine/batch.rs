//! Batch extraction

use crate::core::models::{BatchSource, DepartmentProfile, ExamRecord, Field};
use std::cmp::Ordering;

/// Direct batch value for students retaking a course
pub const RETAKE: &str = "Retake";

/// Leading run of ASCII digits in a section label.
///
/// `"61 A"` gives `"61"`; a label without leading digits gives `""`.
#[must_use]
pub fn extract_batch(section: &str) -> &str {
    let end = section
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(section.len());
    &section[..end]
}

/// Batch of a record according to the department's batch source
#[must_use]
pub fn record_batch(profile: &DepartmentProfile, record: &ExamRecord) -> String {
    match profile.batch_source() {
        BatchSource::Section => extract_batch(&profile.value(record, Field::Section)).to_string(),
        BatchSource::Direct => profile.value(record, Field::Batch),
    }
}

/// Listing order for batches: numeric batches ascending, then other labels
/// alphabetically, with [`RETAKE`] always last.
#[must_use]
pub fn compare_batches(a: &str, b: &str) -> Ordering {
    let rank = |batch: &str| -> (u8, u64) {
        if batch == RETAKE {
            (2, 0)
        } else {
            batch.parse::<u64>().map_or((1, 0), |n| (0, n))
        }
    };
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_batch_from_section() {
        assert_eq!(extract_batch("61 A"), "61");
        assert_eq!(extract_batch("67_B"), "67");
        assert_eq!(extract_batch("A"), "");
        assert_eq!(extract_batch(""), "");
        assert_eq!(extract_batch("123"), "123");
    }

    #[test]
    fn test_compare_batches_orders_retake_last() {
        let mut batches = vec!["Retake", "63", "9", "Evening", "61"];
        batches.sort_by(|a, b| compare_batches(a, b));
        assert_eq!(batches, vec!["9", "61", "63", "Evening", "Retake"]);
    }
}
