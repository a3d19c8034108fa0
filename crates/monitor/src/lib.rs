//! `sensorwatch-monitor` library crate.
//!
//! Request/response handlers that sit behind the sample table: ingestion
//! of sensor channel messages and the threshold monitor. The binaries in
//! `main.rs` and `bin/ingest.rs` wire them to Postgres and the webhook.

pub mod config;
pub mod ingest;
pub mod monitor;

pub use ingest::{IngestError, IngestResponse};
pub use monitor::{Monitor, MonitorError, MonitorResponse};

/// Status code reported by a handler that ran to completion.
pub const STATUS_OK: u16 = 200;
