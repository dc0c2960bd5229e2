//! Configuration module for `exam_routine`

use crate::core::error::RoutineError;
use crate::core::models::DepartmentProfile;
use crate::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

/// Built-in department profiles shared by both build profiles
const DEPARTMENT_DEFAULTS: &str = include_str!("../assets/Departments.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the configuration directory
const DIR_VARIABLE: &str = "$EXAM_ROUTINE";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Dataset location configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory department files are resolved against
    #[serde(default)]
    pub media_dir: String,
    /// Department used when none is given on the command line
    #[serde(default)]
    pub default_department: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Dataset settings
    #[serde(default)]
    pub data: DataConfig,
    /// Department profiles keyed by id (e.g. `cse`)
    #[serde(default)]
    pub departments: BTreeMap<String, DepartmentProfile>,
    /// `[departments.<id>]` tables that could not be read as a profile.
    /// Kept verbatim so saving the config does not lose them.
    #[serde(skip)]
    pub invalid_departments: BTreeMap<String, InvalidDepartment>,
}

/// A department table that failed to deserialize
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidDepartment {
    /// Deserialization error message
    pub reason: String,
    /// The table as written in the config file
    pub raw: toml::Value,
}

#[derive(Deserialize)]
struct BuiltinDepartments {
    departments: BTreeMap<String, DepartmentProfile>,
}

/// File layout with department tables left undecoded
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    data: DataConfig,
    #[serde(default)]
    departments: BTreeMap<String, toml::Value>,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override media directory
    pub media_dir: Option<String>,
    /// Override default department
    pub default_department: Option<String>,
}

impl Config {
    /// Get the `$EXAM_ROUTINE` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/examroutine`
    /// - macOS: `~/Library/Application Support/examroutine`
    /// - Windows: `%APPDATA%\examroutine`
    #[must_use]
    pub fn get_examroutine_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("examroutine")
    }

    /// Merge missing fields and departments from defaults into this config
    ///
    /// Only empty values are filled in, and only departments whose id is not
    /// configured are added; user-edited profiles are left alone.
    ///
    /// # Returns
    ///
    /// `true` if anything was added, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.data.media_dir.is_empty() && !defaults.data.media_dir.is_empty() {
            self.data.media_dir.clone_from(&defaults.data.media_dir);
            changed = true;
        }
        if self.data.default_department.is_empty() && !defaults.data.default_department.is_empty() {
            self.data
                .default_department
                .clone_from(&defaults.data.default_department);
            changed = true;
        }

        for (id, profile) in &defaults.departments {
            if !self.departments.contains_key(id) && !self.invalid_departments.contains_key(id) {
                self.departments.insert(id.clone(), profile.clone());
                changed = true;
            }
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only last for the current run; the configuration file is not
    /// modified.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(media_dir) = &overrides.media_dir {
            self.data.media_dir = Self::expand_variables(media_dir);
        }
        if let Some(department) = &overrides.default_department {
            self.data.default_department.clone_from(department);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_examroutine_dir`](Self::get_examroutine_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_examroutine_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$EXAM_ROUTINE` to the configuration directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_examroutine_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing sections and fields use their serde defaults. `$EXAM_ROUTINE` is
    /// expanded in the log file path and media directory.
    ///
    /// Each `[departments.<id>]` table is decoded on its own. A table that is
    /// not a valid profile is logged and moved to
    /// [`invalid_departments`](Self::invalid_departments); the rest of the
    /// file still loads.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or the `logging`/`data`
    /// sections don't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let raw: RawConfig = toml::from_str(toml_str)?;
        let mut config = Self {
            logging: raw.logging,
            data: raw.data,
            ..Self::default()
        };

        for (id, value) in raw.departments {
            match DepartmentProfile::deserialize(value.clone()) {
                Ok(profile) => {
                    config.departments.insert(id, profile);
                }
                Err(err) => {
                    let reason = err.message().trim().to_string();
                    warn!("Ignoring department '{id}': {reason}");
                    config
                        .invalid_departments
                        .insert(id, InvalidDepartment { reason, raw: value });
                }
            }
        }

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.data.media_dir = Self::expand_variables(&config.data.media_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults, including the built-in
    /// department profiles.
    ///
    /// # Panics
    /// Panics if the embedded defaults are invalid TOML. They are compiled
    /// into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        let mut config = Self::from_toml(CONFIG_DEFAULTS)
            .expect("Failed to parse compiled-in default configuration");
        let builtin: BuiltinDepartments = toml::from_str(DEPARTMENT_DEFAULTS)
            .expect("Failed to parse compiled-in department profiles");
        config.departments = builtin.departments;
        config
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields and
    ///   departments from defaults, and save when anything was added.
    /// - On first run: create the config directory and write the defaults.
    ///
    /// Falls back to defaults, with a warning, if the file cannot be read or
    /// parsed. A broken department table does not count as a parse failure.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        let loaded = fs::read_to_string(&config_file)
            .map_err(|e| e.to_string())
            .and_then(|content| Self::from_toml(&content).map_err(|e| e.message().to_string()));
        match loaded {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            Err(err) => {
                warn!(
                    "Using default configuration, {} could not be loaded: {}",
                    config_file.display(),
                    err.trim()
                );
                defaults
            }
        }
    }

    /// Save configuration to the platform config file
    ///
    /// # Errors
    /// Returns an error if serialization fails, the config directory cannot be
    /// created, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        self.save_to(&config_file)
    }

    /// Save configuration to an explicit path
    ///
    /// # Errors
    /// Same as [`save`](Self::save).
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut value = toml::Value::try_from(self)?;
        if !self.invalid_departments.is_empty() {
            if let Some(table) = value.as_table_mut() {
                let departments = table
                    .entry("departments")
                    .or_insert_with(|| toml::Value::Table(toml::Table::new()));
                if let Some(departments) = departments.as_table_mut() {
                    for (id, broken) in &self.invalid_departments {
                        departments.insert(id.clone(), broken.raw.clone());
                    }
                }
            }
        }
        let toml_str = toml::to_string_pretty(&value)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `media_dir`,
    /// `default_department` (dashes accepted in place of underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "media_dir" | "media-dir" => Some(self.data.media_dir.clone()),
            "default_department" | "default-department" => {
                Some(self.data.default_department.clone())
            }
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized, the value cannot be
    /// parsed, or the default department is not configured.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "media_dir" | "media-dir" => self.data.media_dir = value.to_string(),
            "default_department" | "default-department" => {
                if !self.departments.contains_key(value)
                    && !self.invalid_departments.contains_key(value)
                {
                    return Err(format!("Unknown department: '{value}'"));
                }
                self.data.default_department = value.to_string();
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "media_dir" | "media-dir" => self.data.media_dir.clone_from(&defaults.data.media_dir),
            "default_department" | "default-department" => self
                .data
                .default_department
                .clone_from(&defaults.data.default_department),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Look up and validate a department profile
    ///
    /// # Errors
    /// [`RoutineError::UnknownDepartment`] for unconfigured ids,
    /// [`RoutineError::InvalidProfile`] when the profile breaks an invariant
    /// or its table could not be decoded.
    pub fn department(&self, id: &str) -> Result<&DepartmentProfile, RoutineError> {
        if let Some(broken) = self.invalid_departments.get(id) {
            return Err(RoutineError::InvalidProfile {
                department: id.to_string(),
                reason: broken.reason.clone(),
            });
        }
        let profile = self
            .departments
            .get(id)
            .ok_or_else(|| RoutineError::UnknownDepartment(id.to_string()))?;
        profile.validate(id)?;
        Ok(profile)
    }

    /// Resolve a dataset file against the media directory.
    /// Absolute paths are returned unchanged.
    #[must_use]
    pub fn media_path(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() || self.data.media_dir.is_empty() {
            path.to_path_buf()
        } else {
            Path::new(&self.data.media_dir).join(path)
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[data]")?;
        writeln!(f, "  media_dir = \"{}\"", self.data.media_dir)?;
        writeln!(f, "  default_department = \"{}\"", self.data.default_department)?;

        writeln!(f, "\n[departments]")?;
        for (id, profile) in &self.departments {
            writeln!(f, "  {id} = \"{}\" ({})", profile.name, profile.file)?;
        }
        for (id, broken) in &self.invalid_departments {
            writeln!(f, "  {id} ✗ {}", broken.reason)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_departments_are_valid() {
        let config = Config::from_defaults();
        for id in ["cse", "swe"] {
            assert!(config.department(id).is_ok(), "{id} should validate");
        }
    }

    #[test]
    fn test_unknown_department() {
        let config = Config::from_defaults();
        assert!(matches!(
            config.department("eee"),
            Err(RoutineError::UnknownDepartment(_))
        ));
    }

    #[test]
    fn test_media_path_joins_relative() {
        let mut config = Config::default();
        config.data.media_dir = "/srv/media".to_string();
        assert_eq!(
            config.media_path("cse.json"),
            PathBuf::from("/srv/media/cse.json")
        );
        assert_eq!(
            config.media_path("/abs/cse.json"),
            PathBuf::from("/abs/cse.json")
        );
    }
}
