//! Department dataset loading with fallback

use crate::config::Config;
use crate::core::error::RoutineError;
use crate::core::models::{DepartmentProfile, ExamRecord, Field};
use crate::{debug, info, warn};
use std::fs;
use std::path::Path;

/// Read a JSON array of exam records
///
/// # Errors
/// Returns an error if the file cannot be read or is not a JSON array of objects.
pub fn read_records(path: &Path) -> Result<Vec<ExamRecord>, RoutineError> {
    let content = fs::read_to_string(path)?;
    let records: Vec<ExamRecord> = serde_json::from_str(&content)?;
    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Load a department's records, trying the fallback source when the primary
/// cannot be read or parsed. There are no retries.
///
/// # Errors
/// [`RoutineError::SourceUnavailable`] when the primary fails and there is no
/// fallback, or the fallback fails too.
pub fn load_records(
    config: &Config,
    profile: &DepartmentProfile,
) -> Result<Vec<ExamRecord>, RoutineError> {
    let primary = config.media_path(&profile.file);
    let primary_err = match read_records(&primary) {
        Ok(records) => {
            info!("Loaded {} exam data from {}", profile.name, primary.display());
            log_missing_fields(profile, &records);
            return Ok(records);
        }
        Err(err) => err,
    };

    warn!(
        "{} file not available at {}: {primary_err}",
        profile.name,
        primary.display()
    );

    let Some(fallback) = profile.fallback.as_deref().filter(|f| !f.is_empty()) else {
        return Err(RoutineError::SourceUnavailable {
            department: profile.name.clone(),
            reason: primary_err.to_string(),
        });
    };

    let fallback = config.media_path(fallback);
    info!(
        "Loading fallback exam data for {} from {}",
        profile.name,
        fallback.display()
    );
    let records = read_records(&fallback).map_err(|err| RoutineError::SourceUnavailable {
        department: profile.name.clone(),
        reason: format!("fallback {}: {err}", fallback.display()),
    })?;
    log_missing_fields(profile, &records);
    Ok(records)
}

/// Missing keys read as empty strings; report how often that happens
fn log_missing_fields(profile: &DepartmentProfile, records: &[ExamRecord]) {
    for field in [Field::CourseId, Field::CourseTitle, Field::RoomNo, Field::Date] {
        let Some(key) = profile.fields.key(field) else {
            continue;
        };
        let missing = records.iter().filter(|r| !r.contains_key(key)).count();
        if missing > 0 {
            debug!("{missing} {} records lack '{key}' ({field})", profile.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_records_rejects_non_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"ID\": \"CSE101\"}}").unwrap();
        let err = read_records(file.path()).unwrap_err();
        assert!(matches!(err, RoutineError::Json(_)));
    }

    #[test]
    fn test_read_records_accepts_numbers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"ID": "CSE101", "Seat(s)": 30}}]"#).unwrap();
        let records = read_records(file.path()).unwrap();
        assert_eq!(records[0].get("Seat(s)").as_deref(), Some("30"));
    }
}
