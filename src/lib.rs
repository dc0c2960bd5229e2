//! Shared library for `exam_routine`
//! Loads department exam datasets and turns them into filtered, date-bucketed
//! exam sessions. The CLI binary is a thin presentation layer over this crate.

pub mod core;
pub mod logger;
pub mod shared;

pub use crate::core::config;
pub use shared::*;
