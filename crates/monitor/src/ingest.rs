//! Sensor message ingestion.
//!
//! Turns one sensor channel payload into a [`StoredSample`] with a fresh
//! opaque key and writes it to the table. Malformed payloads are rejected
//! before anything is written.

use serde::Serialize;
use uuid::Uuid;

use sensorwatch_core::types::now_epoch_secs;
use sensorwatch_core::{CoreError, Sample};
use sensorwatch_db::{SampleTable, StoredSample, TableError};

use crate::STATUS_OK;

/// Body returned when a sample is stored.
pub const INGEST_OK_BODY: &str = "Sample stored";

/// Error type for an ingestion invocation.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Rejected payload: {0}")]
    Payload(#[from] CoreError),

    #[error("Failed to store sample: {0}")]
    Table(#[from] TableError),
}

/// Outcome of a successful ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct IngestResponse {
    pub status_code: u16,
    pub body: String,
    /// Key assigned to the stored row.
    pub id: Uuid,
}

/// Parse, validate and store one payload.
///
/// Payloads without a timestamp are stamped with the ingestion time.
pub async fn handle<T>(table: &T, payload: &str) -> Result<IngestResponse, IngestError>
where
    T: SampleTable + ?Sized,
{
    let sample = Sample::parse_payload(payload, now_epoch_secs())?;
    let record = StoredSample::new(sample);
    table.put(&record).await?;

    tracing::info!(
        id = %record.id,
        temperature = record.temperature,
        humidity = record.humidity,
        timestamp = record.timestamp,
        "Sample ingested",
    );

    Ok(IngestResponse {
        status_code: STATUS_OK,
        body: INGEST_OK_BODY.to_string(),
        id: record.id,
    })
}
