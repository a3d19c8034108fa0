//! Stored sensor sample row.

use chrono::{SubsecRound, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use sensorwatch_core::types::{EpochSecs, Timestamp};
use sensorwatch_core::Sample;

/// A sample as written to the `sensor_samples` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct StoredSample {
    /// Opaque unique key (UUIDv7).
    pub id: Uuid,
    pub temperature: f64,
    pub humidity: f64,
    pub timestamp: EpochSecs,
    /// When ingestion wrote the row. Breaks ties between equal timestamps.
    pub ingested_at: Timestamp,
}

impl StoredSample {
    /// Wrap a sample with a fresh key and the current ingestion time.
    ///
    /// `ingested_at` is truncated to microseconds, the precision Postgres
    /// keeps, so a stored row reads back equal to the value written.
    pub fn new(sample: Sample) -> Self {
        Self {
            id: Uuid::now_v7(),
            temperature: sample.temperature,
            humidity: sample.humidity,
            timestamp: sample.timestamp,
            ingested_at: Utc::now().trunc_subsecs(6),
        }
    }

    pub fn sample(&self) -> Sample {
        Sample::new(self.temperature, self.humidity, self.timestamp)
    }
}
