//! Distinct filter values offered for a loaded dataset

use super::batch::{compare_batches, record_batch};
use super::dates::{compare_raw_dates, format_date};
use crate::core::models::{BatchSource, DepartmentProfile, ExamRecord, Field};
use serde::Serialize;
use std::collections::BTreeSet;

/// One entry of the date filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateOption {
    /// Raw dataset value, used for matching
    pub value: String,
    /// Long display form
    pub label: String,
}

/// All filter values for a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Batches, numeric first and "Retake" last
    pub batches: Vec<String>,
    /// "Section" or "Course"
    pub section_label: String,
    /// Sections or course ids, sorted
    pub sections: Vec<String>,
    /// Dates in chronological order
    pub dates: Vec<DateOption>,
}

impl FilterOptions {
    /// Collect every option list, limiting sections/courses to `batch` when set
    #[must_use]
    pub fn collect(profile: &DepartmentProfile, records: &[ExamRecord], batch: Option<&str>) -> Self {
        Self {
            batches: batch_options(profile, records),
            section_label: profile.section_filter_label().to_string(),
            sections: section_options(profile, records, batch),
            dates: date_options(profile, records),
        }
    }
}

/// Distinct non-empty batches
#[must_use]
pub fn batch_options(profile: &DepartmentProfile, records: &[ExamRecord]) -> Vec<String> {
    let distinct: BTreeSet<String> = records
        .iter()
        .map(|record| record_batch(profile, record))
        .filter(|batch| !batch.is_empty())
        .collect();
    let mut batches: Vec<String> = distinct.into_iter().collect();
    batches.sort_by(|a, b| compare_batches(a, b));
    batches
}

/// Distinct sections (section departments) or course ids (direct-batch
/// departments), optionally limited to one batch
#[must_use]
pub fn section_options(
    profile: &DepartmentProfile,
    records: &[ExamRecord],
    batch: Option<&str>,
) -> Vec<String> {
    let field = match profile.batch_source() {
        BatchSource::Section => Field::Section,
        BatchSource::Direct => Field::CourseId,
    };
    let batch = batch.filter(|b| !b.is_empty());
    let distinct: BTreeSet<String> = records
        .iter()
        .filter(|record| batch.is_none_or(|b| record_batch(profile, record) == b))
        .map(|record| profile.value(record, field))
        .collect();
    distinct.into_iter().collect()
}

/// Distinct non-blank dates in chronological order
#[must_use]
pub fn date_options(profile: &DepartmentProfile, records: &[ExamRecord]) -> Vec<DateOption> {
    let distinct: BTreeSet<String> = records
        .iter()
        .map(|record| profile.value(record, Field::Date))
        .filter(|date| !date.trim().is_empty())
        .collect();
    let mut dates: Vec<String> = distinct.into_iter().collect();
    dates.sort_by(|a, b| compare_raw_dates(a, b));
    dates
        .into_iter()
        .map(|value| DateOption {
            label: format_date(&value),
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Capabilities, FieldMapping};

    fn direct_profile() -> DepartmentProfile {
        DepartmentProfile {
            name: "SWE Department".to_string(),
            file: "swe.json".to_string(),
            fallback: None,
            fields: FieldMapping {
                course_id: "Course ID".to_string(),
                course_title: "Course Title".to_string(),
                department: "Department".to_string(),
                room_no: "Room No".to_string(),
                date: "Date".to_string(),
                batch: Some("Batch".to_string()),
                ..FieldMapping::default()
            },
            display: Capabilities {
                has_batch: true,
                ..Capabilities::default()
            },
        }
    }

    fn row(course: &str, batch: &str, date: &str) -> ExamRecord {
        ExamRecord::new()
            .with("Course ID", course)
            .with("Batch", batch)
            .with("Date", date)
    }

    #[test]
    fn test_batches_put_retake_last() {
        let data = vec![
            row("SE331", "Retake", "01-07-2025"),
            row("SE221", "43", "02-07-2025"),
            row("SE111", "41", "02-07-2025"),
            row("SE112", "", "02-07-2025"),
        ];
        assert_eq!(batch_options(&direct_profile(), &data), vec!["41", "43", "Retake"]);
    }

    #[test]
    fn test_course_options_limited_by_batch() {
        let data = vec![
            row("SE331", "41", "01-07-2025"),
            row("SE221", "43", "02-07-2025"),
            row("SE111", "41", "02-07-2025"),
        ];
        let profile = direct_profile();
        assert_eq!(section_options(&profile, &data, Some("41")), vec!["SE111", "SE331"]);
        assert_eq!(section_options(&profile, &data, None).len(), 3);
        assert_eq!(FilterOptions::collect(&profile, &data, None).section_label, "Course");
    }

    #[test]
    fn test_dates_sorted_chronologically() {
        let data = vec![
            row("A", "41", "10-07-2025"),
            row("B", "41", "02-07-2025"),
            row("C", "41", " "),
            row("D", "41", "02-07-2025"),
        ];
        let dates = date_options(&direct_profile(), &data);
        let values: Vec<&str> = dates.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(values, vec!["02-07-2025", "10-07-2025"]);
        assert_eq!(dates[0].label, "Wednesday, July 2, 2025");
    }
}
