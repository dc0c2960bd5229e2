//! Filter engine
//!
//! Every active criterion must match; empty or absent criteria match
//! everything. Missing record fields read as the empty string.

use super::batch::{extract_batch, record_batch};
use crate::core::models::{BatchSource, DepartmentProfile, ExamRecord, Field};
use serde::{Deserialize, Serialize};

/// User-selected filter values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact batch
    #[serde(default)]
    pub batch: Option<String>,
    /// Exact section (section departments) or course id (direct-batch departments)
    #[serde(default)]
    pub section: Option<String>,
    /// Exact raw date string
    #[serde(default)]
    pub date: Option<String>,
    /// Case-insensitive substring searched across several fields
    #[serde(default)]
    pub search: Option<String>,
}

impl FilterCriteria {
    /// Criteria that match everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batch filter
    #[must_use]
    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = Some(batch.into());
        self
    }

    /// Set the section-or-course filter
    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Set the date filter
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the search term
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Whether no criterion is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.batch, &self.section, &self.date, &self.search]
            .into_iter()
            .all(|value| active(value).is_none())
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Records matching all active criteria, in input order
#[must_use]
pub fn apply_filters<'a>(
    profile: &DepartmentProfile,
    records: &'a [ExamRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a ExamRecord> {
    let search = active(&criteria.search).map(str::to_lowercase);
    records
        .iter()
        .filter(|record| {
            matches_batch(profile, record, active(&criteria.batch))
                && matches_section(profile, record, active(&criteria.section))
                && active(&criteria.date).is_none_or(|date| profile.value(record, Field::Date) == date)
                && search
                    .as_deref()
                    .is_none_or(|term| matches_search(profile, record, term))
        })
        .collect()
}

fn matches_batch(profile: &DepartmentProfile, record: &ExamRecord, batch: Option<&str>) -> bool {
    batch.is_none_or(|batch| record_batch(profile, record) == batch)
}

fn matches_section(profile: &DepartmentProfile, record: &ExamRecord, section: Option<&str>) -> bool {
    section.is_none_or(|section| {
        let field = match profile.batch_source() {
            BatchSource::Section => Field::Section,
            BatchSource::Direct => Field::CourseId,
        };
        profile.value(record, field) == section
    })
}

/// Fields scanned by the free-text search, lowercased
#[must_use]
pub fn search_fields(profile: &DepartmentProfile, record: &ExamRecord) -> Vec<String> {
    let mut fields = vec![
        profile.value(record, Field::CourseTitle),
        profile.value(record, Field::CourseId),
    ];

    if profile.display.has_teacher && profile.fields.key(Field::Teacher).is_some() {
        fields.push(profile.value(record, Field::Teacher));
    }

    match profile.batch_source() {
        BatchSource::Section if profile.fields.key(Field::Section).is_some() => {
            let section = profile.value(record, Field::Section);
            let batch = extract_batch(&section).to_string();
            fields.push(format!("batch {batch}"));
            fields.push(batch);
            fields.push(section);
        }
        BatchSource::Direct if profile.fields.key(Field::Batch).is_some() => {
            let batch = profile.value(record, Field::Batch);
            fields.push(format!("batch {batch}"));
            fields.push(batch);
        }
        _ => {}
    }

    fields.into_iter().map(|f| f.to_lowercase()).collect()
}

/// Whether `term` (already lowercased) occurs in any searchable field
#[must_use]
pub fn matches_search(profile: &DepartmentProfile, record: &ExamRecord, term: &str) -> bool {
    search_fields(profile, record)
        .iter()
        .any(|field| field.contains(term))
}
