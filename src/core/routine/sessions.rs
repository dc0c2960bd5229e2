//! Session grouping: one exam session per course and section/batch, with
//! every room row folded into its room list.

use crate::core::models::{
    DepartmentProfile, ExamRecord, ExamSession, Field, RoomAllocation, SessionKey,
};
use std::collections::HashMap;

/// Session key of a record, e.g. `"CSE101-61 A"`
#[must_use]
pub fn session_key(profile: &DepartmentProfile, record: &ExamRecord) -> String {
    let course_id = profile.value(record, Field::CourseId);
    match profile.session_key() {
        SessionKey::CourseSection => {
            format!("{course_id}-{}", profile.value(record, Field::Section))
        }
        SessionKey::CourseBatch => format!("{course_id}-{}", profile.value(record, Field::Batch)),
        SessionKey::Course => course_id,
    }
}

fn room_allocation(profile: &DepartmentProfile, record: &ExamRecord) -> RoomAllocation {
    RoomAllocation {
        room_no: profile.value(record, Field::RoomNo),
        seats: profile.optional_value(record, Field::Seats),
        total: profile.optional_value(record, Field::Total),
    }
}

/// Group records into sessions, in first-seen key order.
///
/// The representative record switches to a later record only when the
/// current one has no time and the later one does. Rooms are appended in
/// input order without deduplication.
#[must_use]
pub fn group_sessions<'a>(
    profile: &DepartmentProfile,
    records: &[&'a ExamRecord],
) -> Vec<ExamSession<'a>> {
    let mut sessions: Vec<ExamSession<'a>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for &record in records {
        let key = session_key(profile, record);
        let position = if let Some(&existing) = index.get(&key) {
            let session = &mut sessions[existing];
            let current_time = profile.value(session.record, Field::Time);
            let candidate_time = profile.value(record, Field::Time);
            if current_time.is_empty() && !candidate_time.is_empty() {
                session.record = record;
            }
            existing
        } else {
            index.insert(key.clone(), sessions.len());
            sessions.push(ExamSession::new(key, record));
            sessions.len() - 1
        };
        sessions[position]
            .rooms
            .push(room_allocation(profile, record));
    }

    sessions
}
