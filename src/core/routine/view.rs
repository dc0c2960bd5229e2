//! Display model built from categorized, grouped sessions

use super::categorize::{categorize, CategorizedRecords};
use super::dates::{compare_raw_dates, format_date};
use super::filter::{apply_filters, FilterCriteria};
use super::sessions::group_sessions;
use crate::core::models::{DepartmentProfile, ExamRecord, ExamSession, Field};
use chrono::NaiveDate;
use serde::Serialize;

/// Sessions sharing one exam date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup<'a> {
    /// Raw dataset date
    pub date: String,
    /// Long display form
    pub label: String,
    /// Sessions on this date, first-seen order
    pub sessions: Vec<ExamSession<'a>>,
}

/// Everything the presentation layer needs for one filter pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutineView<'a> {
    /// Sessions held today
    pub today: Vec<ExamSession<'a>>,
    /// Sessions on the next exam date
    pub next: Vec<ExamSession<'a>>,
    /// Display form of the next exam date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_label: Option<String>,
    /// Remaining upcoming sessions grouped by date
    pub future: Vec<DateGroup<'a>>,
    /// Sessions already held
    pub past: Vec<ExamSession<'a>>,
}

impl<'a> RoutineView<'a> {
    /// Group each bucket into sessions; future records are grouped per date
    /// first, dates in chronological order with malformed dates last.
    #[must_use]
    pub fn from_buckets(profile: &DepartmentProfile, buckets: &CategorizedRecords<'a>) -> Self {
        Self {
            today: group_sessions(profile, &buckets.today),
            next: group_sessions(profile, &buckets.next),
            next_label: buckets.next_date.map(super::dates::format_long),
            future: group_by_date(profile, &buckets.future),
            past: group_sessions(profile, &buckets.past),
        }
    }

    /// Whether there is nothing to show
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.today.is_empty() && self.next.is_empty() && self.future.is_empty() && self.past.is_empty()
    }

    /// Number of sessions across every section
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.today.len()
            + self.next.len()
            + self.past.len()
            + self.future.iter().map(|g| g.sessions.len()).sum::<usize>()
    }
}

fn group_by_date<'a>(profile: &DepartmentProfile, records: &[&'a ExamRecord]) -> Vec<DateGroup<'a>> {
    let mut by_date: Vec<(String, Vec<&'a ExamRecord>)> = Vec::new();
    for &record in records {
        let date = profile.value(record, Field::Date);
        if let Some((_, group)) = by_date.iter_mut().find(|(d, _)| *d == date) {
            group.push(record);
        } else {
            by_date.push((date, vec![record]));
        }
    }
    by_date.sort_by(|(a, _), (b, _)| compare_raw_dates(a, b));
    by_date
        .into_iter()
        .map(|(date, group)| DateGroup {
            label: format_date(&date),
            sessions: group_sessions(profile, &group),
            date,
        })
        .collect()
}

/// Filter, categorize and group in one pass
#[must_use]
pub fn build_view<'a>(
    profile: &DepartmentProfile,
    records: &'a [ExamRecord],
    criteria: &FilterCriteria,
    today: NaiveDate,
) -> RoutineView<'a> {
    let filtered = apply_filters(profile, records, criteria);
    let buckets = categorize(profile, &filtered, today);
    RoutineView::from_buckets(profile, &buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Capabilities, FieldMapping};

    fn profile() -> DepartmentProfile {
        DepartmentProfile {
            name: "CSE Department".to_string(),
            file: "cse.json".to_string(),
            fallback: None,
            fields: FieldMapping {
                course_id: "ID".to_string(),
                course_title: "Course Title".to_string(),
                department: "Dept.".to_string(),
                room_no: "Room No".to_string(),
                date: "Date".to_string(),
                section: Some("Section".to_string()),
                ..FieldMapping::default()
            },
            display: Capabilities {
                has_section: true,
                group_by_section: true,
                ..Capabilities::default()
            },
        }
    }

    fn row(id: &str, room: &str, date: &str) -> ExamRecord {
        ExamRecord::new()
            .with("ID", id)
            .with("Section", "61 A")
            .with("Room No", room)
            .with("Date", date)
    }

    #[test]
    fn test_future_grouped_by_date_in_order() {
        let data = vec![
            row("CSE401", "1", "20-03-2024"),
            row("CSE301", "2", "10-03-2024"),
            row("CSE201", "3", "05-03-2024"),
            row("CSE402", "4", "20-03-2024"),
            row("CSE101", "5", "TBA"),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let view = build_view(&profile(), &data, &FilterCriteria::new(), today);

        assert_eq!(view.next.len(), 1);
        assert_eq!(view.next_label.as_deref(), Some("Tuesday, March 5, 2024"));
        let dates: Vec<&str> = view.future.iter().map(|g| g.date.as_str()).collect();
        assert_eq!(dates, vec!["10-03-2024", "20-03-2024", "TBA"]);
        assert_eq!(view.future[1].sessions.len(), 2);
        assert_eq!(view.session_count(), 5);
    }

    #[test]
    fn test_empty_view() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let view = build_view(&profile(), &[], &FilterCriteria::new(), today);
        assert!(view.is_empty());
    }

    #[test]
    fn test_search_moves_next_date() {
        let data = vec![row("CSE201", "1", "05-03-2024"), row("CSE301", "2", "10-03-2024")];
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let view = build_view(
            &profile(),
            &data,
            &FilterCriteria::new().with_search("cse301"),
            today,
        );
        assert_eq!(view.next.len(), 1);
        assert_eq!(view.next[0].record.text("ID"), "CSE301");
        assert!(view.future.is_empty());
    }
}
