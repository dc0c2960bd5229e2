//! CLI argument definitions for `examroutine`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use exam_routine::config::ConfigOverrides;
use exam_routine::core::preprocess::LINK_FIELDS;
use exam_routine::core::routine::FilterCriteria;
use exam_routine::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Output format for routine and filter listings
#[derive(Copy, Clone, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `media_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List configured departments.
    Departments,
    /// Show the exam routine of a department.
    ///
    /// Sessions are split into today, the next exam date, later dates and
    /// past exams.
    Show {
        /// Department id (defaults to config `default_department`)
        #[arg(value_name = "DEPT")]
        department: Option<String>,

        /// Only show this batch (e.g. 61, Retake)
        #[arg(short, long)]
        batch: Option<String>,

        /// Only show this section (or course id for direct-batch departments)
        #[arg(short, long)]
        section: Option<String>,

        /// Only show this date (DD-MM-YYYY, as written in the dataset)
        #[arg(short, long)]
        date: Option<String>,

        /// Case-insensitive search over title, id, teacher, section and batch
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,

        /// Treat this date (DD-MM-YYYY) as today
        #[arg(long, value_name = "DATE")]
        today: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List the filter values available for a department.
    Filters {
        /// Department id (defaults to config `default_department`)
        #[arg(value_name = "DEPT")]
        department: Option<String>,

        /// Limit sections/courses to this batch
        #[arg(short, long)]
        batch: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Combine and normalize raw per-day exam files into one dataset.
    Process {
        /// Directory containing raw JSON files
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        /// Output file (defaults to `processed_exam_routine.json` in INPUT_DIR)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Add empty fields to every entry of a processed dataset that lacks them.
    FillFields {
        /// Dataset file to patch in place
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field to add; repeat for several (defaults to Syllabus and Notes)
        #[arg(long = "field", value_name = "KEY", default_values = LINK_FIELDS)]
        fields: Vec<String>,
    },
}

impl Command {
    /// Whether the command writes a JSON document to stdout
    pub const fn writes_json(&self) -> bool {
        matches!(
            self,
            Self::Show {
                format: OutputFormat::Json,
                ..
            } | Self::Filters {
                format: OutputFormat::Json,
                ..
            }
        )
    }

    /// Filter criteria carried by `show`; empty for other commands
    pub fn criteria(&self) -> FilterCriteria {
        match self {
            Self::Show {
                batch,
                section,
                date,
                search,
                ..
            } => FilterCriteria {
                batch: batch.clone(),
                section: section.clone(),
                date: date.clone(),
                search: search.clone(),
            },
            _ => FilterCriteria::default(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "examroutine",
    about = "Exam routine viewer and dataset preprocessor",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config media directory
    #[arg(long = "config-media-dir", value_name = "DIR")]
    pub config_media_dir: Option<PathBuf>,

    /// Override config media directory (short form)
    #[arg(long = "media-dir", value_name = "DIR")]
    pub media_dir: Option<PathBuf>,

    /// Override config default department
    #[arg(long = "config-department", value_name = "DEPT")]
    pub config_department: Option<String>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--media-dir`) take precedence over long-form
    /// flags (e.g., `--config-media-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            media_dir: self
                .media_dir
                .as_ref()
                .or(self.config_media_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
            default_department: self.config_department.clone(),
        }
    }
}
