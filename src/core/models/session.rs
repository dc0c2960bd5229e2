//! Exam session model

use super::ExamRecord;
use serde::Serialize;

/// One room used by an exam session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomAllocation {
    /// Room number
    pub room_no: String,
    /// Seats in this room, when the department tracks them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<String>,
    /// Total students, when the department tracks it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
}

impl RoomAllocation {
    /// Room without seat or total information
    #[must_use]
    pub const fn new(room_no: String) -> Self {
        Self {
            room_no,
            seats: None,
            total: None,
        }
    }
}

/// A course exam spread over one or more rooms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamSession<'a> {
    /// Grouping key (e.g. `"CSE101-61 A"`)
    pub key: String,
    /// Representative record: the first one carrying a time, else the first seen
    pub record: &'a ExamRecord,
    /// Rooms in input order
    pub rooms: Vec<RoomAllocation>,
}

impl<'a> ExamSession<'a> {
    /// Start a session from its first record
    #[must_use]
    pub const fn new(key: String, record: &'a ExamRecord) -> Self {
        Self {
            key,
            record,
            rooms: Vec::new(),
        }
    }

    /// First total reported by any room
    #[must_use]
    pub fn total(&self) -> Option<&str> {
        self.rooms.iter().find_map(|room| room.total.as_deref())
    }

    /// Sum of numeric seat counts across rooms, `None` if no room reports seats
    #[must_use]
    pub fn seat_count(&self) -> Option<u32> {
        let counts: Vec<u32> = self
            .rooms
            .iter()
            .filter_map(|room| room.seats.as_deref())
            .filter_map(|seats| seats.trim().parse::<u32>().ok())
            .collect();
        if counts.is_empty() {
            None
        } else {
            Some(counts.iter().sum())
        }
    }
}
