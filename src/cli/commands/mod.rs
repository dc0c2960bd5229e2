//! CLI command handlers for `examroutine`.
//!
//! Each command is implemented in its own submodule. Handlers print `✓`/`✗`
//! status lines and exit with a non-zero status on failure.

pub mod config;
pub mod departments;
pub mod fill_fields;
pub mod filters;
pub mod process;
pub mod show;

use exam_routine::config::Config;
use exam_routine::core::{load_dataset, RoutineState};
use exam_routine::{error, info};

/// Department given on the command line, else the configured default
pub fn department_id(config: &Config, department: Option<&str>) -> String {
    department
        .filter(|d| !d.is_empty())
        .unwrap_or(&config.data.default_department)
        .to_string()
}

/// Load a department or report why it could not be loaded
pub fn load_or_report(config: &Config, department: Option<&str>) -> Option<RoutineState> {
    let id = department_id(config, department);
    if id.is_empty() {
        eprintln!("✗ No department given and no default_department configured");
        return None;
    }
    match load_dataset(config, &id) {
        Ok(state) => {
            info!(
                "Loaded {} records for {}",
                state.records().len(),
                state.profile().name
            );
            Some(state)
        }
        Err(e) => {
            error!("Failed to load department '{id}': {e}");
            eprintln!("✗ {e}");
            None
        }
    }
}
