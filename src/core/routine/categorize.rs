//! Today / next / future / past partition

use super::dates::parse_date;
use crate::core::models::{DepartmentProfile, ExamRecord, Field};
use chrono::NaiveDate;
use serde::Serialize;

/// Records split by their date relative to today
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorizedRecords<'a> {
    /// Exams held today
    pub today: Vec<&'a ExamRecord>,
    /// Exams on the earliest date after today
    pub next: Vec<&'a ExamRecord>,
    /// Later exams, plus records whose date cannot be parsed
    pub future: Vec<&'a ExamRecord>,
    /// Exams before today
    pub past: Vec<&'a ExamRecord>,
    /// The date the `next` bucket was built for
    pub next_date: Option<NaiveDate>,
}

impl CategorizedRecords<'_> {
    /// Total number of records across all buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.today.len() + self.next.len() + self.future.len() + self.past.len()
    }

    /// Whether every bucket is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `records` relative to `today`.
///
/// The next date is the earliest parsed date strictly after `today` across
/// the whole input, so narrowing the input (e.g. by a search) can move it.
/// Precedence is today, next, past, future; malformed dates land in future.
#[must_use]
pub fn categorize<'a>(
    profile: &DepartmentProfile,
    records: &[&'a ExamRecord],
    today: NaiveDate,
) -> CategorizedRecords<'a> {
    let dated: Vec<(&'a ExamRecord, Option<NaiveDate>)> = records
        .iter()
        .map(|record| (*record, parse_date(&profile.value(record, Field::Date))))
        .collect();

    let next_date = dated
        .iter()
        .filter_map(|(_, date)| *date)
        .filter(|date| *date > today)
        .min();

    let mut buckets = CategorizedRecords {
        next_date,
        ..CategorizedRecords::default()
    };

    for (record, date) in dated {
        match date {
            Some(d) if d == today => buckets.today.push(record),
            Some(d) if Some(d) == next_date => buckets.next.push(record),
            Some(d) if d < today => buckets.past.push(record),
            _ => buckets.future.push(record),
        }
    }

    buckets
}
