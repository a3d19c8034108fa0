//! Core domain types for the sensorwatch pipeline.
//!
//! Pure logic only: no I/O, no async. The channel and table backends live
//! in `sensorwatch-events` and `sensorwatch-db`.

pub mod alert;
pub mod env;
pub mod error;
pub mod sample;
pub mod threshold;
pub mod topics;
pub mod types;

pub use alert::Alert;
pub use error::CoreError;
pub use sample::Sample;
