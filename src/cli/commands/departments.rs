//! Departments command handler

use exam_routine::config::Config;

/// List configured departments, marking the default one
pub fn run(config: &Config) {
    if config.departments.is_empty() && config.invalid_departments.is_empty() {
        println!("No departments configured");
        return;
    }

    for (id, profile) in &config.departments {
        let marker = if *id == config.data.default_department {
            "*"
        } else {
            " "
        };
        let status = match profile.validate(id) {
            Ok(()) => String::new(),
            Err(e) => format!("  (✗ {e})"),
        };
        println!(
            "{marker} {id:<8} {:<20} {}{status}",
            profile.name,
            config.media_path(&profile.file).display()
        );
    }

    for (id, broken) in &config.invalid_departments {
        let marker = if *id == config.data.default_department {
            "*"
        } else {
            " "
        };
        println!("{marker} {id:<8} ✗ {}", broken.reason);
    }
}
