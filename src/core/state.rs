//! Application state: the selected department and its loaded records

use crate::config::Config;
use crate::core::dataset::load_records;
use crate::core::error::RoutineError;
use crate::core::models::{DepartmentProfile, ExamRecord};
use crate::core::routine::{build_view, FilterCriteria, FilterOptions, RoutineView};
use chrono::NaiveDate;

/// The currently loaded department.
///
/// Loading another department builds a new state; nothing is shared between
/// loads.
#[derive(Debug, Clone)]
pub struct RoutineState {
    department: String,
    profile: DepartmentProfile,
    records: Vec<ExamRecord>,
}

impl RoutineState {
    /// Build a state from already loaded records
    ///
    /// # Errors
    /// Returns [`RoutineError::InvalidProfile`] if the profile is invalid.
    pub fn new(
        department: impl Into<String>,
        profile: DepartmentProfile,
        records: Vec<ExamRecord>,
    ) -> Result<Self, RoutineError> {
        let department = department.into();
        profile.validate(&department)?;
        Ok(Self {
            department,
            profile,
            records,
        })
    }

    /// Department id (e.g. `cse`)
    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Active department profile
    #[must_use]
    pub const fn profile(&self) -> &DepartmentProfile {
        &self.profile
    }

    /// Every loaded record, in file order
    #[must_use]
    pub fn records(&self) -> &[ExamRecord] {
        &self.records
    }

    /// Filter, categorize relative to `today`, and group into sessions
    #[must_use]
    pub fn view(&self, criteria: &FilterCriteria, today: NaiveDate) -> RoutineView<'_> {
        build_view(&self.profile, &self.records, criteria, today)
    }

    /// Filter values available in this dataset
    #[must_use]
    pub fn options(&self, batch: Option<&str>) -> FilterOptions {
        FilterOptions::collect(&self.profile, &self.records, batch)
    }
}

/// Resolve `department_id` and load its dataset.
///
/// # Errors
/// `UnknownDepartment`, `InvalidProfile`, or `SourceUnavailable`.
pub fn load_dataset(config: &Config, department_id: &str) -> Result<RoutineState, RoutineError> {
    let profile = config.department(department_id)?.clone();
    let records = load_records(config, &profile)?;
    RoutineState::new(department_id, profile, records)
}
