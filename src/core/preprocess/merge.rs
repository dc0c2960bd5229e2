//! Combining and cleaning raw exam files

use super::normalize::{hyphens_to_spaces, standardize_date, standardize_section};
use crate::core::error::RoutineError;
use crate::core::models::ExamRecord;
use crate::{debug, info, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Keys of the canonical section-based schema
pub const CANONICAL_KEYS: [&str; 13] = [
    "Dept.",
    "ID",
    "Course Title",
    "Tech. Int.",
    "Section",
    "Room No",
    "Seat(s)",
    "Total",
    "Date",
    "Time",
    "Slot",
    "Syllabus",
    "Notes",
];

/// Prefix of files written by a previous run
const PROCESSED_PREFIX: &str = "processed_";

/// `*.json` files in `dir`, sorted by name, excluding earlier output
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub fn input_files(dir: &Path) -> Result<Vec<PathBuf>, RoutineError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| !name.starts_with(PROCESSED_PREFIX))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Concatenate every JSON file in `dir`.
///
/// Array files contribute each object element, object files contribute one
/// record. Files that cannot be read or parsed are logged and skipped.
///
/// # Errors
/// [`RoutineError::NoInputFiles`] if the directory has no JSON files.
pub fn combine_directory(dir: &Path) -> Result<Vec<ExamRecord>, RoutineError> {
    let files = input_files(dir)?;
    if files.is_empty() {
        return Err(RoutineError::NoInputFiles(dir.to_path_buf()));
    }
    info!("Found {} JSON files in {}", files.len(), dir.display());

    let mut combined = Vec::new();
    for path in &files {
        let value: Value = match fs::read_to_string(path)
            .map_err(RoutineError::from)
            .and_then(|content| serde_json::from_str(&content).map_err(RoutineError::from))
        {
            Ok(value) => value,
            Err(err) => {
                warn!("Skipping {}: {err}", path.display());
                continue;
            }
        };

        match value {
            Value::Array(items) => {
                let before = combined.len();
                combined.extend(items.into_iter().filter_map(|item| match item {
                    Value::Object(map) => Some(ExamRecord::from_map(map)),
                    _ => None,
                }));
                debug!("{}: {} entries", path.display(), combined.len() - before);
            }
            Value::Object(map) => {
                combined.push(ExamRecord::from_map(map));
                debug!("{}: 1 entry", path.display());
            }
            _ => warn!("Skipping {}: unexpected data format", path.display()),
        }
    }

    info!("Combined {} entries", combined.len());
    Ok(combined)
}

/// First present key among `keys`, trimmed
fn first_of(raw: &ExamRecord, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| raw.get(key))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Map a raw record onto the canonical schema
#[must_use]
pub fn clean_record(raw: &ExamRecord) -> ExamRecord {
    let section = standardize_section(&hyphens_to_spaces(&raw.text("Section")));
    let date = standardize_date(raw.text("Date").trim());

    ExamRecord::new()
        .with("Dept.", &first_of(raw, &["Dept.", "Department"]))
        .with("ID", &first_of(raw, &["ID", "Course ID"]))
        .with("Course Title", &first_of(raw, &["Course Title"]))
        .with("Tech. Int.", &first_of(raw, &["Tech. Int."]))
        .with("Section", &section)
        .with("Room No", &first_of(raw, &["Room No"]))
        .with("Seat(s)", &first_of(raw, &["Seat(s)"]))
        .with("Total", &first_of(raw, &["Total"]))
        .with("Date", &date)
        .with("Time", &first_of(raw, &["Time"]))
        .with("Slot", &first_of(raw, &["Slot"]))
        .with("Syllabus", &first_of(raw, &["Syllabus"]))
        .with("Notes", &first_of(raw, &["Notes"]))
}

/// Add each of `keys` that a record lacks as an empty string.
/// Returns how many records were changed.
pub fn ensure_fields(records: &mut [ExamRecord], keys: &[&str]) -> usize {
    let mut modified = 0;
    for record in records.iter_mut() {
        let mut changed = false;
        for key in keys {
            if !record.contains_key(key) {
                record.insert(key, "");
                changed = true;
            }
        }
        if changed {
            modified += 1;
        }
    }
    modified
}
