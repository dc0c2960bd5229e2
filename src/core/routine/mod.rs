//! The exam routine pipeline
//!
//! records → [`filter`] → [`categorize`] → [`sessions`] → [`view`]
//!
//! Every stage is a pure function of the department profile, the records and
//! (for categorization) the current date.

pub mod batch;
pub mod categorize;
pub mod dates;
pub mod filter;
pub mod options;
pub mod sessions;
pub mod view;

pub use batch::{extract_batch, record_batch, RETAKE};
pub use categorize::{categorize, CategorizedRecords};
pub use dates::{format_date, parse_date};
pub use filter::{apply_filters, FilterCriteria};
pub use options::{DateOption, FilterOptions};
pub use sessions::group_sessions;
pub use view::{build_view, DateGroup, RoutineView};
