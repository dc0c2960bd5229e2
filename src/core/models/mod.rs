//! Data models for `exam_routine`

pub mod department;
pub mod record;
pub mod session;

pub use department::{BatchSource, Capabilities, DepartmentProfile, Field, FieldMapping, SessionKey};
pub use record::ExamRecord;
pub use session::{ExamSession, RoomAllocation};
