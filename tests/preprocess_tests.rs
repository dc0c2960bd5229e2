//! Integration tests for the preprocessing pass

use exam_routine::core::preprocess::{
    combine_directory, fill_missing_fields, process_directory, summary_path, DatasetStatistics,
    FillSummary, LINK_FIELDS,
};
use exam_routine::core::RoutineError;
use exam_routine::core::models::ExamRecord;
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).expect("Failed to write fixture");
}

#[test]
fn test_combine_directory_in_name_order() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(&dir, "02_07_2025.json", r#"[{"ID": "B1"}, {"ID": "B2"}]"#);
    write(&dir, "01_07_2025.json", r#"[{"ID": "A1"}]"#);
    write(&dir, "03_07_2025.json", r#"{"ID": "C1"}"#);
    write(&dir, "processed_old.json", r#"[{"ID": "OLD"}]"#);
    write(&dir, "broken.json", "{not json");
    write(&dir, "notes.txt", "ignored");

    let records = combine_directory(dir.path()).expect("Failed to combine");
    let ids: Vec<String> = records.iter().map(|r| r.text("ID")).collect();
    assert_eq!(ids, vec!["A1", "B1", "B2", "C1"]);
}

#[test]
fn test_combine_empty_directory() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    assert!(matches!(
        combine_directory(dir.path()),
        Err(RoutineError::NoInputFiles(_))
    ));
}

#[test]
fn test_process_directory_writes_dataset_and_summary() {
    let input = TempDir::new().expect("Failed to create temp dir");
    write(
        &input,
        "01_7_2025.json",
        r#"[
          {"Department": "CSE", "Course ID": "CSE301", "Course Title": "Algorithms",
           "Section": "61_A", "Room No": 701, "Seat(s)": 30, "Total": "", "Date": "10-7-2025",
           "Time": "09:00 AM", "Slot": "A"},
          {"Department": "CSE", "Course ID": "CSE301", "Course Title": "Algorithms",
           "Section": "61A", "Room No": 702, "Seat(s)": 25, "Total": 55, "Date": "10-07-2025",
           "Time": "09:00 AM", "Slot": "A"}
        ]"#,
    );
    write(
        &input,
        "02_7_2025.json",
        r#"[{"Dept.": "CSE", "ID": "CSE201", "Course Title": "Data Structures",
             "Section": "62 b", "Room No": "601", "Seat(s)": "40", "Total": "40",
             "Date": "2-7-2025", "Time": "11:00 AM", "Slot": "B"}]"#,
    );
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let output = out_dir.path().join("nested").join("cse.json");

    let summary = process_directory(input.path(), &output).expect("Failed to process");
    assert_eq!(summary.stats.total_entries, 3);
    assert_eq!(summary.stats.unique_courses, 2);
    assert_eq!(summary.stats.sections, vec!["61 A", "62 B"]);
    assert_eq!(summary.stats.date_range.start, "02-07-2025");
    assert_eq!(summary.stats.date_range.end, "10-07-2025");

    let written: Vec<ExamRecord> =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let rooms: Vec<String> = written.iter().map(|r| r.text("Room No")).collect();
    assert_eq!(rooms, vec!["601", "701", "702"]);
    assert_eq!(written[1].text("Total"), "55");
    assert_eq!(written[1].text("Time"), "09:00 AM");
    assert_eq!(written[2].text("Total"), "");
    assert_eq!(written[2].text("Time"), "");
    assert_eq!(written[2].text("Seat(s)"), "25");

    let summary_file = summary_path(&output);
    assert!(summary_file.ends_with("cse_summary.json"));
    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(summary_file).unwrap()).unwrap();
    assert_eq!(saved["total_entries"], 3);
    assert!(saved["processed_at"].is_string());

    let stats: DatasetStatistics = serde_json::from_value(saved).unwrap();
    assert_eq!(stats, summary.stats);
}

#[test]
fn test_fill_missing_fields_patches_dataset() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(
        &dir,
        "cse_processed_exam_routine.json",
        r#"[
  {"ID": "CSE101", "Syllabus": "https://example.org/cse101"},
  {"ID": "CSE201", "Syllabus": "", "Notes": ""},
  {"ID": "CSE301"}
]"#,
    );
    let path = dir.path().join("cse_processed_exam_routine.json");

    let summary = fill_missing_fields(&path, &LINK_FIELDS).expect("Failed to fill fields");
    assert_eq!(
        summary,
        FillSummary {
            total: 3,
            modified: 2
        }
    );

    let records: Vec<ExamRecord> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(records.iter().all(|r| r.contains_key("Syllabus") && r.contains_key("Notes")));
    assert_eq!(records[0].text("Syllabus"), "https://example.org/cse101");
    assert_eq!(records[2].text("Notes"), "");
}

#[test]
fn test_fill_missing_fields_leaves_complete_file_untouched() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let content = r#"[{"ID": "CSE101", "Syllabus": "", "Notes": ""}]"#;
    write(&dir, "cse.json", content);
    let path = dir.path().join("cse.json");

    let summary = fill_missing_fields(&path, &LINK_FIELDS).expect("Failed to fill fields");
    assert_eq!(summary.modified, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_fill_missing_fields_rejects_non_array() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(&dir, "cse.json", r#"{"ID": "CSE101"}"#);
    assert!(matches!(
        fill_missing_fields(&dir.path().join("cse.json"), &LINK_FIELDS),
        Err(RoutineError::Json(_))
    ));
}
