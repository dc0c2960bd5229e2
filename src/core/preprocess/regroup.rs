//! Regrouping cleaned records by date and course section

use crate::core::models::ExamRecord;
use crate::core::routine::dates::compare_raw_dates;
use std::collections::HashMap;

/// Course-level values kept only on the first room row of a group
const FIRST_ROOM_ONLY: [&str; 5] = ["Total", "Time", "Slot", "Syllabus", "Notes"];

#[derive(Debug)]
struct CourseGroup<'a> {
    info: &'a ExamRecord,
    total: String,
    rooms: Vec<&'a ExamRecord>,
}

#[derive(Debug, Default)]
struct DateBucket<'a> {
    groups: Vec<CourseGroup<'a>>,
    index: HashMap<String, usize>,
}

impl<'a> DateBucket<'a> {
    fn add(&mut self, record: &'a ExamRecord) {
        let key = format!("{}-{}", record.text("ID"), record.text("Section"));
        let total = record.text("Total");
        if let Some(&pos) = self.index.get(&key) {
            let group = &mut self.groups[pos];
            if group.total.is_empty() {
                group.total = total;
            }
            group.rooms.push(record);
        } else {
            self.index.insert(key, self.groups.len());
            self.groups.push(CourseGroup {
                info: record,
                total,
                rooms: vec![record],
            });
        }
    }
}

/// Group cleaned records by date, then by `ID-Section`, and flatten back to
/// one row per room.
///
/// Course details come from the first record of each group; the total is the
/// first non-empty one seen. Total, time, slot, syllabus and notes appear only
/// on the first room row. Dates are emitted chronologically with blank or
/// unparseable dates last.
#[must_use]
pub fn regroup(records: &[ExamRecord]) -> Vec<ExamRecord> {
    let mut dates: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, DateBucket<'_>> = HashMap::new();
    for record in records {
        let date = record.text("Date");
        buckets
            .entry(date.clone())
            .or_insert_with(|| {
                dates.push(date);
                DateBucket::default()
            })
            .add(record);
    }
    dates.sort_by(|a, b| compare_raw_dates(a, b));

    let mut flat = Vec::with_capacity(records.len());
    for date in &dates {
        let Some(bucket) = buckets.get(date) else {
            continue;
        };
        for group in &bucket.groups {
            for (i, room) in group.rooms.iter().enumerate() {
                let mut row = group.info.clone();
                row.insert("Room No", &room.text("Room No"));
                row.insert("Seat(s)", &room.text("Seat(s)"));
                row.insert("Total", &group.total);
                if i > 0 {
                    for key in FIRST_ROOM_ONLY {
                        row.insert(key, "");
                    }
                }
                flat.push(row);
            }
        }
    }
    flat
}
