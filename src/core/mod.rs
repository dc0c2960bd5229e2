//! Core module: configuration, data model, and the routine pipeline

pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod preprocess;
pub mod routine;
pub mod state;

pub use error::RoutineError;
pub use state::{load_dataset, RoutineState};
