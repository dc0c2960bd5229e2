//! Fill-fields command handler

use exam_routine::core::preprocess::fill_missing_fields;
use exam_routine::error;
use std::path::Path;

/// Add the given keys to every entry of `file` that lacks them
pub fn run(file: &Path, fields: &[String]) {
    let keys: Vec<&str> = fields.iter().map(String::as_str).collect();
    match fill_missing_fields(file, &keys) {
        Ok(summary) if summary.modified > 0 => {
            println!(
                "✓ Updated {} of {} entries in {}",
                summary.modified,
                summary.total,
                file.display()
            );
        }
        Ok(summary) => {
            println!(
                "✓ All {} entries already have {}",
                summary.total,
                keys.join(", ")
            );
        }
        Err(e) => {
            error!("Filling fields in {} failed: {e}", file.display());
            eprintln!("✗ Failed to update {}: {e}", file.display());
            std::process::exit(1);
        }
    }
}
