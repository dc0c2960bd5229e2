//! Command-line interface entry point for `examroutine`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use exam_routine::config::Config;
use exam_routine::info;
use exam_routine::logger::{
    enable_debug, enable_verbose, init_file_logging, log_to_stderr, set_level, Level,
};

fn main() {
    let args = Cli::parse();

    // Keep stdout a clean JSON document; log lines go to stderr
    if args.command.writes_json() {
        log_to_stderr(true);
    }

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let criteria = args.command.criteria();
    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Departments => commands::departments::run(&config),
        Command::Show {
            department,
            today,
            format,
            ..
        } => {
            commands::show::run(
                &config,
                department.as_deref(),
                &criteria,
                today.as_deref(),
                format,
            );
        }
        Command::Filters {
            department,
            batch,
            format,
        } => {
            commands::filters::run(&config, department.as_deref(), batch.as_deref(), format);
        }
        Command::Process { input_dir, output } => {
            commands::process::run(&input_dir, output.as_deref(), verbose);
        }
        Command::FillFields { file, fields } => {
            commands::fill_fields::run(&file, &fields);
        }
    }
}
