//! Department profile model
//!
//! A profile describes where a department's dataset lives, how its raw keys
//! map onto the canonical exam fields, and which optional fields it carries.
//! Every capability-dependent decision in the pipeline goes through the
//! helpers on [`DepartmentProfile`].

use super::ExamRecord;
use crate::core::error::RoutineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical exam fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Course code
    CourseId,
    /// Course title
    CourseTitle,
    /// Department name as printed in the dataset
    Department,
    /// Section label (e.g. "61 A")
    Section,
    /// Direct batch field
    Batch,
    /// Teacher initials
    Teacher,
    /// Room number
    RoomNo,
    /// Seats assigned in the room
    Seats,
    /// Total students for the course section
    Total,
    /// Exam date, `DD-MM-YYYY`
    Date,
    /// Exam time
    Time,
    /// Exam slot
    Slot,
    /// Syllabus link
    Syllabus,
    /// Notes link
    Notes,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CourseId => "course_id",
            Self::CourseTitle => "course_title",
            Self::Department => "department",
            Self::Section => "section",
            Self::Batch => "batch",
            Self::Teacher => "teacher",
            Self::RoomNo => "room_no",
            Self::Seats => "seats",
            Self::Total => "total",
            Self::Date => "date",
            Self::Time => "time",
            Self::Slot => "slot",
            Self::Syllabus => "syllabus",
            Self::Notes => "notes",
        };
        write!(f, "{name}")
    }
}

/// Canonical field name → raw dataset key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Key holding the course id
    pub course_id: String,
    /// Key holding the course title
    pub course_title: String,
    /// Key holding the department name
    pub department: String,
    /// Key holding the room number
    pub room_no: String,
    /// Key holding the exam date
    pub date: String,
    /// Key holding the section label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Key holding the direct batch value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
    /// Key holding the teacher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    /// Key holding seats per room
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<String>,
    /// Key holding the total student count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
    /// Key holding the exam time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Key holding the exam slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
    /// Key holding the syllabus link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syllabus: Option<String>,
    /// Key holding the notes link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl FieldMapping {
    /// Raw key for a canonical field, if mapped
    #[must_use]
    pub fn key(&self, field: Field) -> Option<&str> {
        let key = match field {
            Field::CourseId => Some(&self.course_id),
            Field::CourseTitle => Some(&self.course_title),
            Field::Department => Some(&self.department),
            Field::RoomNo => Some(&self.room_no),
            Field::Date => Some(&self.date),
            Field::Section => self.section.as_ref(),
            Field::Batch => self.batch.as_ref(),
            Field::Teacher => self.teacher.as_ref(),
            Field::Seats => self.seats.as_ref(),
            Field::Total => self.total.as_ref(),
            Field::Time => self.time.as_ref(),
            Field::Slot => self.slot.as_ref(),
            Field::Syllabus => self.syllabus.as_ref(),
            Field::Notes => self.notes.as_ref(),
        };
        key.map(String::as_str).filter(|k| !k.is_empty())
    }
}

/// Optional fields and behaviors a department supports
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Rooms carry seat counts
    #[serde(default)]
    pub has_seats: bool,
    /// Records name a teacher
    #[serde(default)]
    pub has_teacher: bool,
    /// Batches are derived from section labels
    #[serde(default)]
    pub has_section: bool,
    /// Records carry a total student count
    #[serde(default)]
    pub has_total: bool,
    /// Records link a syllabus
    #[serde(default)]
    pub has_syllabus: bool,
    /// Records link notes
    #[serde(default)]
    pub has_notes: bool,
    /// Records carry a direct batch field
    #[serde(default)]
    pub has_batch: bool,
    /// Sessions are keyed by course and section
    #[serde(default)]
    pub group_by_section: bool,
}

/// Where a record's batch comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSource {
    /// Leading digits of the section label
    Section,
    /// A dedicated batch field
    Direct,
}

/// What identifies one exam session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKey {
    /// Course id plus section label
    CourseSection,
    /// Course id plus batch value
    CourseBatch,
    /// Course id only
    Course,
}

/// Configuration for one department dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentProfile {
    /// Human-readable name (e.g. "CSE Department")
    pub name: String,
    /// Dataset file, relative to the media directory unless absolute
    pub file: String,
    /// Secondary dataset file tried when the primary cannot be loaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    /// Raw key mapping
    pub fields: FieldMapping,
    /// Capability flags
    #[serde(default)]
    pub display: Capabilities,
}

impl DepartmentProfile {
    /// Check the profile's invariants.
    ///
    /// Exactly one of `has_section` / `has_batch` must be set and the chosen
    /// strategy's key must be mapped.
    ///
    /// # Errors
    /// Returns [`RoutineError::InvalidProfile`] describing the first violation.
    pub fn validate(&self, id: &str) -> Result<(), RoutineError> {
        let invalid = |reason: &str| RoutineError::InvalidProfile {
            department: id.to_string(),
            reason: reason.to_string(),
        };

        match (self.display.has_section, self.display.has_batch) {
            (true, true) => return Err(invalid("has_section and has_batch are both set")),
            (false, false) => return Err(invalid("one of has_section or has_batch must be set")),
            _ => {}
        }
        if self.display.has_section && self.fields.key(Field::Section).is_none() {
            return Err(invalid("has_section requires a section key"));
        }
        if self.display.has_batch && self.fields.key(Field::Batch).is_none() {
            return Err(invalid("has_batch requires a batch key"));
        }
        if self.file.trim().is_empty() {
            return Err(invalid("no dataset file configured"));
        }
        Ok(())
    }

    /// Batch derivation strategy
    #[must_use]
    pub const fn batch_source(&self) -> BatchSource {
        if self.display.has_batch {
            BatchSource::Direct
        } else {
            BatchSource::Section
        }
    }

    /// Session grouping key
    #[must_use]
    pub const fn session_key(&self) -> SessionKey {
        match self.batch_source() {
            BatchSource::Direct => SessionKey::CourseBatch,
            BatchSource::Section if self.display.group_by_section => SessionKey::CourseSection,
            BatchSource::Section => SessionKey::Course,
        }
    }

    /// Label for the section-or-course filter
    #[must_use]
    pub const fn section_filter_label(&self) -> &'static str {
        match self.batch_source() {
            BatchSource::Section => "Section",
            BatchSource::Direct => "Course",
        }
    }

    /// Whether a field is shown for this department.
    ///
    /// Required fields and time/slot are always enabled; the others follow the
    /// capability flags.
    #[must_use]
    pub const fn is_enabled(&self, field: Field) -> bool {
        let caps = &self.display;
        match field {
            Field::Section => caps.has_section,
            Field::Batch => caps.has_batch,
            Field::Teacher => caps.has_teacher,
            Field::Seats => caps.has_seats,
            Field::Total => caps.has_total,
            Field::Syllabus => caps.has_syllabus,
            Field::Notes => caps.has_notes,
            Field::CourseId
            | Field::CourseTitle
            | Field::Department
            | Field::RoomNo
            | Field::Date
            | Field::Time
            | Field::Slot => true,
        }
    }

    /// Value of a canonical field on a record.
    ///
    /// Unmapped fields and missing keys read as the empty string.
    #[must_use]
    pub fn value(&self, record: &ExamRecord, field: Field) -> String {
        self.fields
            .key(field)
            .map(|key| record.text(key))
            .unwrap_or_default()
    }

    /// Like [`value`](Self::value) but `None` when the field is disabled,
    /// unmapped, blank, numeric zero or `false`.
    #[must_use]
    pub fn optional_value(&self, record: &ExamRecord, field: Field) -> Option<String> {
        if !self.is_enabled(field) {
            return None;
        }
        let key = self.fields.key(field)?;
        record.present(key).filter(|v| !v.trim().is_empty())
    }
}
