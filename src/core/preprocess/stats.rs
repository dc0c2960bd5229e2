//! Summary statistics over a processed dataset

use crate::core::models::ExamRecord;
use crate::core::routine::dates::{compare_raw_dates, parse_date};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// First and last exam day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest date
    pub start: String,
    /// Latest date
    pub end: String,
    /// Distinct exam days
    pub total_days: usize,
}

/// Counts over a canonical-schema dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    /// Number of rows
    pub total_entries: usize,
    /// Distinct course ids
    pub unique_courses: usize,
    /// Distinct sections
    pub unique_sections: usize,
    /// Department names, sorted
    pub unique_departments: Vec<String>,
    /// Span of parseable dates
    pub date_range: DateRange,
    /// Sections, sorted
    pub sections: Vec<String>,
    /// Rows per section
    pub section_counts: BTreeMap<String, usize>,
    /// Course ids, sorted
    pub courses: Vec<String>,
}

impl DatasetStatistics {
    /// Compute statistics; only parseable dates count toward the date range
    #[must_use]
    pub fn compute(records: &[ExamRecord]) -> Self {
        let mut sections = BTreeSet::new();
        let mut courses = BTreeSet::new();
        let mut departments = BTreeSet::new();
        let mut dates = BTreeSet::new();
        let mut section_counts = BTreeMap::new();

        for record in records {
            let section = record.text("Section");
            *section_counts.entry(section.clone()).or_insert(0) += 1;
            sections.insert(section);
            courses.insert(record.text("ID"));
            departments.insert(record.text("Dept."));
            let date = record.text("Date");
            if parse_date(&date).is_some() {
                dates.insert(date);
            }
        }

        let mut dates: Vec<String> = dates.into_iter().collect();
        dates.sort_by(|a, b| compare_raw_dates(a, b));

        Self {
            total_entries: records.len(),
            unique_courses: courses.len(),
            unique_sections: sections.len(),
            unique_departments: departments.into_iter().collect(),
            date_range: DateRange {
                start: dates.first().cloned().unwrap_or_default(),
                end: dates.last().cloned().unwrap_or_default(),
                total_days: dates.len(),
            },
            sections: sections.into_iter().collect(),
            section_counts,
            courses: courses.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, section: &str, date: &str) -> ExamRecord {
        ExamRecord::new()
            .with("Dept.", "CSE")
            .with("ID", id)
            .with("Section", section)
            .with("Date", date)
    }

    #[test]
    fn test_statistics() {
        let data = vec![
            row("CSE301", "61 A", "10-07-2025"),
            row("CSE301", "61 A", "10-07-2025"),
            row("CSE201", "62 B", "02-07-2025"),
            row("CSE101", "61 A", ""),
        ];
        let stats = DatasetStatistics::compute(&data);
        assert_eq!(stats.total_entries, 4);
        assert_eq!(stats.unique_courses, 3);
        assert_eq!(stats.unique_sections, 2);
        assert_eq!(stats.unique_departments, vec!["CSE"]);
        assert_eq!(stats.date_range.start, "02-07-2025");
        assert_eq!(stats.date_range.end, "10-07-2025");
        assert_eq!(stats.date_range.total_days, 2);
        assert_eq!(stats.section_counts["61 A"], 3);
    }

    #[test]
    fn test_empty_statistics() {
        let stats = DatasetStatistics::compute(&[]);
        assert_eq!(stats, DatasetStatistics::default());
    }
}
