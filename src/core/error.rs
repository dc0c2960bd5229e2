//! Error type shared by dataset loading and preprocessing

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised while resolving departments, loading datasets, or
/// preprocessing raw exam dumps.
#[derive(Debug)]
pub enum RoutineError {
    /// The requested department id is not configured.
    UnknownDepartment(String),
    /// The department profile breaks a configuration invariant.
    InvalidProfile {
        /// Department id
        department: String,
        /// What is wrong with the profile
        reason: String,
    },
    /// Neither the primary source nor the fallback could be loaded.
    SourceUnavailable {
        /// Human-readable department name
        department: String,
        /// Last failure encountered
        reason: String,
    },
    /// Preprocessing found no JSON files to combine.
    NoInputFiles(PathBuf),
    /// Filesystem failure.
    Io(io::Error),
    /// JSON (de)serialization failure.
    Json(serde_json::Error),
}

impl fmt::Display for RoutineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDepartment(id) => write!(f, "unknown department: '{id}'"),
            Self::InvalidProfile { department, reason } => {
                write!(f, "invalid profile for department '{department}': {reason}")
            }
            Self::SourceUnavailable { department, reason } => {
                write!(f, "no data available for {department}: {reason}")
            }
            Self::NoInputFiles(dir) => write!(f, "no JSON files found in {}", dir.display()),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
        }
    }
}

impl std::error::Error for RoutineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RoutineError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RoutineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
