//! Repository for the `sensor_samples` table (append-only time-series).

use sqlx::PgPool;

use crate::models::sample::StoredSample;

/// Column list for `sensor_samples` queries.
const COLUMNS: &str = "id, temperature, humidity, \"timestamp\", ingested_at";

/// Provides query operations for stored samples.
pub struct SampleRepo;

impl SampleRepo {
    /// Insert a single sample row.
    pub async fn insert(pool: &PgPool, sample: &StoredSample) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO sensor_samples ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5)"
        );
        sqlx::query(&query)
            .bind(sample.id)
            .bind(sample.temperature)
            .bind(sample.humidity)
            .bind(sample.timestamp)
            .bind(sample.ingested_at)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Get the most recent sample by sample time.
    ///
    /// Explicitly ordered; an unordered `LIMIT 1` scan gives no recency
    /// guarantee.
    pub async fn latest(pool: &PgPool) -> Result<Option<StoredSample>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sensor_samples \
             ORDER BY \"timestamp\" DESC, ingested_at DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, StoredSample>(&query)
            .fetch_optional(pool)
            .await
    }
}
