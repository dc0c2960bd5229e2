//! Process command handler

use exam_routine::core::preprocess::process_directory;
use exam_routine::{error, info};
use std::path::{Path, PathBuf};

/// Default output file name; the `processed_` prefix keeps it out of later runs
pub const DEFAULT_OUTPUT: &str = "processed_exam_routine.json";

/// Combine and normalize every raw file in `input_dir`
pub fn run(input_dir: &Path, output: Option<&Path>, verbose: bool) {
    let output = output.map_or_else(|| input_dir.join(DEFAULT_OUTPUT), PathBuf::from);

    let summary = match process_directory(input_dir, &output) {
        Ok(summary) => summary,
        Err(e) => {
            error!("Processing {} failed: {e}", input_dir.display());
            eprintln!("✗ Failed to process {}: {e}", input_dir.display());
            std::process::exit(1);
        }
    };
    info!("Processed {} entries", summary.stats.total_entries);

    let stats = &summary.stats;
    println!("✓ Processed data saved to: {}", summary.output_file);
    println!("  Total entries: {}", stats.total_entries);
    println!("  Unique courses: {}", stats.unique_courses);
    println!("  Unique sections: {}", stats.unique_sections);
    println!("  Departments: {}", stats.unique_departments.join(", "));
    println!(
        "  Date range: {} to {} ({} exam days)",
        stats.date_range.start, stats.date_range.end, stats.date_range.total_days
    );
    if verbose {
        println!("  Sections:");
        for (section, count) in &stats.section_counts {
            println!("    {section}: {count} entries");
        }
    }
}
