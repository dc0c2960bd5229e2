//! Show command handler

use crate::args::OutputFormat;
use crate::commands::load_or_report;
use exam_routine::config::Config;
use exam_routine::core::models::{DepartmentProfile, ExamSession, Field};
use exam_routine::core::routine::dates::today as local_today;
use exam_routine::core::routine::{
    parse_date, record_batch, FilterCriteria, RoutineView, RETAKE,
};
use exam_routine::{debug, error};
use chrono::NaiveDate;
use std::fmt::Write;

/// Print the routine of one department
pub fn run(
    config: &Config,
    department: Option<&str>,
    criteria: &FilterCriteria,
    today: Option<&str>,
    format: OutputFormat,
) {
    let today = match resolve_today(today) {
        Ok(date) => date,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(2);
        }
    };
    let Some(state) = load_or_report(config, department) else {
        std::process::exit(1);
    };

    debug!("Filtering with {criteria:?} relative to {today}");
    let view = state.view(criteria, today);

    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize routine: {e}");
                eprintln!("✗ Failed to serialize routine: {e}");
                std::process::exit(1);
            }
        },
        OutputFormat::Text => print!("{}", render_view(state.profile(), &view)),
    }
}

fn resolve_today(raw: Option<&str>) -> Result<NaiveDate, String> {
    match raw {
        None => Ok(local_today()),
        Some(raw) => parse_date(raw).ok_or_else(|| format!("Invalid --today date: '{raw}'")),
    }
}

/// Render the whole view as text, one block per section
pub fn render_view(profile: &DepartmentProfile, view: &RoutineView<'_>) -> String {
    let mut out = format!("=== {} ===\n", profile.name);
    if view.is_empty() {
        out.push_str("\nNo exams match the current filters.\n");
        return out;
    }

    render_block(&mut out, profile, "Today's Exams", &view.today);
    if !view.next.is_empty() {
        let title = view
            .next_label
            .as_ref()
            .map_or_else(|| "Next Exam".to_string(), |label| format!("Next Exam: {label}"));
        render_block(&mut out, profile, &title, &view.next);
    }
    if !view.future.is_empty() {
        out.push_str("\n--- Upcoming Exams ---\n");
        for group in &view.future {
            let _ = writeln!(out, "\n[{}]", group.label);
            for session in &group.sessions {
                render_session(&mut out, profile, session);
            }
        }
    }
    render_block(&mut out, profile, "Past Exams", &view.past);
    out
}

fn render_block(out: &mut String, profile: &DepartmentProfile, title: &str, sessions: &[ExamSession<'_>]) {
    if sessions.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n--- {title} ---");
    for session in sessions {
        render_session(out, profile, session);
    }
}

fn render_session(out: &mut String, profile: &DepartmentProfile, session: &ExamSession<'_>) {
    let record = session.record;
    let _ = writeln!(
        out,
        "\n  {}  {}",
        profile.value(record, Field::CourseId),
        profile.value(record, Field::CourseTitle)
    );

    let mut details = Vec::new();
    if let Some(section) = profile.optional_value(record, Field::Section) {
        details.push(format!("Section {section}"));
    }
    match record_batch(profile, record).as_str() {
        "" => {}
        RETAKE => details.push(RETAKE.to_string()),
        batch => details.push(format!("Batch {batch}")),
    }
    if let Some(teacher) = profile.optional_value(record, Field::Teacher) {
        details.push(format!("Teacher {teacher}"));
    }
    if let Some(time) = profile.optional_value(record, Field::Time) {
        details.push(time);
    }
    if let Some(slot) = profile.optional_value(record, Field::Slot) {
        details.push(format!("Slot {slot}"));
    }
    if !details.is_empty() {
        let _ = writeln!(out, "    {}", details.join(" | "));
    }

    let rooms: Vec<String> = session
        .rooms
        .iter()
        .map(|room| match &room.seats {
            Some(seats) => format!("{} ({seats})", room.room_no),
            None => room.room_no.clone(),
        })
        .collect();
    if !rooms.is_empty() {
        let _ = writeln!(out, "    Rooms: {}", rooms.join(", "));
    }
    if let Some(total) = session.total() {
        let _ = writeln!(out, "    Total: {total}");
    }
    if let Some(syllabus) = profile.optional_value(record, Field::Syllabus) {
        let _ = writeln!(out, "    Syllabus: {syllabus}");
    }
    if let Some(notes) = profile.optional_value(record, Field::Notes) {
        let _ = writeln!(out, "    Notes: {notes}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_routine::core::models::{Capabilities, ExamRecord, FieldMapping};
    use exam_routine::core::routine::build_view;

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
                seats: Some("Seat(s)".to_string()),
                ..FieldMapping::default()
            },
            display: Capabilities {
                has_section: true,
                has_seats: true,
                group_by_section: true,
                ..Capabilities::default()
            },
        }
    }

    #[test]
    fn test_resolve_today() {
        assert_eq!(
            resolve_today(Some("02-03-2024")),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap())
        );
        assert!(resolve_today(Some("2024/03/02")).is_err());
    }

    #[test]
    fn test_render_view_sections() {
        let data = vec![
            ExamRecord::new()
                .with("ID", "CSE101")
                .with("Course Title", "Structured Programming")
                .with("Section", "61 A")
                .with("Room No", "701")
                .with("Seat(s)", "30")
                .with("Date", "05-03-2024"),
            ExamRecord::new()
                .with("ID", "CSE101")
                .with("Section", "61 A")
                .with("Room No", "702")
                .with("Seat(s)", "25")
                .with("Date", "05-03-2024"),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let profile = profile();
        let view = build_view(&profile, &data, &FilterCriteria::new(), today);
        let text = render_view(&profile, &view);

        assert!(text.contains("Next Exam: Tuesday, March 5, 2024"));
        assert!(text.contains("CSE101  Structured Programming"));
        assert!(text.contains("Section 61 A | Batch 61"));
        assert!(text.contains("Rooms: 701 (30), 702 (25)"));
        assert!(!text.contains("Past Exams"));
    }

    #[test]
    fn test_retake_cohort_label() {
        let profile = DepartmentProfile {
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
        };
        let data = vec![
            ExamRecord::new()
                .with("Course ID", "SE331")
                .with("Course Title", "Software Testing")
                .with("Batch", "Retake")
                .with("Room No", "801")
                .with("Date", "10-07-2025"),
            ExamRecord::new()
                .with("Course ID", "SE221")
                .with("Course Title", "Software Design")
                .with("Batch", "43")
                .with("Room No", "802")
                .with("Date", "10-07-2025"),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
        let view = build_view(&profile, &data, &FilterCriteria::new(), today);
        let text = render_view(&profile, &view);

        assert!(text.contains("\n    Retake\n"));
        assert!(!text.contains("Batch Retake"));
        assert!(text.contains("Batch 43"));
    }

    #[test]
    fn test_render_empty_view() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let profile = profile();
        let view = build_view(&profile, &[], &FilterCriteria::new(), today);
        assert!(render_view(&profile, &view).contains("No exams match"));
    }
}
