//! Offline preparation of department datasets from raw per-day exam files
//!
//! `process_directory` runs the full pass: combine every JSON file in a
//! directory, clean each record onto the canonical schema, regroup by date and
//! course section, then write the dataset and a statistics summary next to it.
//! `fill_missing_fields` patches an already processed dataset in place.

pub mod merge;
pub mod normalize;
pub mod regroup;
pub mod stats;

pub use merge::{clean_record, combine_directory, ensure_fields, CANONICAL_KEYS};
pub use normalize::{hyphens_to_spaces, standardize_date, standardize_section};
pub use regroup::regroup;
pub use stats::{DatasetStatistics, DateRange};

use crate::core::dataset::read_records;
use crate::core::error::RoutineError;
use crate::core::models::ExamRecord;
use crate::{debug, info};
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Statistics written beside the processed dataset
#[derive(Debug, Clone, Serialize)]
pub struct ProcessSummary {
    /// Dataset statistics
    #[serde(flatten)]
    pub stats: DatasetStatistics,
    /// Local time of the run, `%Y-%m-%d %H:%M:%S`
    pub processed_at: String,
    /// Directory the raw files came from
    pub input_folder: String,
    /// Written dataset path
    pub output_file: String,
}

/// Link fields older datasets may lack
pub const LINK_FIELDS: [&str; 2] = ["Syllabus", "Notes"];

/// Outcome of [`fill_missing_fields`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillSummary {
    /// Records in the dataset
    pub total: usize,
    /// Records that gained at least one key
    pub modified: usize,
}

/// `cse.json` -> `cse_summary.json`
#[must_use]
pub fn summary_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{stem}_summary.json"))
}

/// Combine, clean and regroup without touching the filesystem for output
///
/// # Errors
/// Returns an error if the input directory cannot be read or has no JSON files.
pub fn prepare_records(input_dir: &Path) -> Result<Vec<ExamRecord>, RoutineError> {
    let combined = combine_directory(input_dir)?;
    let cleaned: Vec<ExamRecord> = combined.iter().map(clean_record).collect();
    info!("Cleaned {} entries", cleaned.len());
    let processed = regroup(&cleaned);
    info!("Regrouped into {} entries", processed.len());
    Ok(processed)
}

/// Run the whole preprocessing pass and write both output files
///
/// # Errors
/// Returns an error if reading the input or writing either output fails.
pub fn process_directory(input_dir: &Path, output: &Path) -> Result<ProcessSummary, RoutineError> {
    let processed = prepare_records(input_dir)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, serde_json::to_string_pretty(&processed)?)?;
    info!("Processed data saved to {}", output.display());

    let summary = ProcessSummary {
        stats: DatasetStatistics::compute(&processed),
        processed_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        input_folder: input_dir.display().to_string(),
        output_file: output.display().to_string(),
    };
    let summary_file = summary_path(output);
    fs::write(&summary_file, serde_json::to_string_pretty(&summary)?)?;
    info!("Summary saved to {}", summary_file.display());

    Ok(summary)
}

/// Add each of `keys` as an empty string to every record of an existing
/// dataset that lacks it. The file is rewritten only when a record changed.
///
/// # Errors
/// Returns an error if the dataset cannot be read, parsed or written back.
pub fn fill_missing_fields(path: &Path, keys: &[&str]) -> Result<FillSummary, RoutineError> {
    let mut records = read_records(path)?;
    let modified = ensure_fields(&mut records, keys);
    if modified > 0 {
        fs::write(path, serde_json::to_string_pretty(&records)?)?;
        info!(
            "Added {} to {modified} of {} entries in {}",
            keys.join("/"),
            records.len(),
            path.display()
        );
    } else {
        debug!("{} already has {}", path.display(), keys.join("/"));
    }
    Ok(FillSummary {
        total: records.len(),
        modified,
    })
}
