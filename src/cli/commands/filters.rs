//! Filters command handler

use crate::args::OutputFormat;
use crate::commands::load_or_report;
use exam_routine::config::Config;
use exam_routine::core::routine::FilterOptions;
use exam_routine::error;
use std::fmt::Write;

/// Print the batch, section/course and date options of a department
pub fn run(config: &Config, department: Option<&str>, batch: Option<&str>, format: OutputFormat) {
    let Some(state) = load_or_report(config, department) else {
        std::process::exit(1);
    };
    let options = state.options(batch);

    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&options) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize filter options: {e}");
                eprintln!("✗ Failed to serialize filter options: {e}");
                std::process::exit(1);
            }
        },
        OutputFormat::Text => print!("{}", render_options(&options)),
    }
}

/// Text listing of every option group
pub fn render_options(options: &FilterOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Batches: {}", join_or_none(&options.batches));
    let _ = writeln!(
        out,
        "{}s: {}",
        options.section_label,
        join_or_none(&options.sections)
    );
    let _ = writeln!(out, "Dates:");
    if options.dates.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for date in &options.dates {
        let _ = writeln!(out, "  {:<12} {}", date.value, date.label);
    }
    out
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}
