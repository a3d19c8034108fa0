//! Postgres-backed [`SampleTable`].

use async_trait::async_trait;

use crate::models::sample::StoredSample;
use crate::repositories::SampleRepo;
use crate::table::{SampleTable, TableError};
use crate::DbPool;

/// [`SampleTable`] over the `sensor_samples` table.
#[derive(Clone)]
pub struct PgSampleTable {
    pool: DbPool,
}

impl PgSampleTable {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SampleTable for PgSampleTable {
    async fn put(&self, record: &StoredSample) -> Result<(), TableError> {
        SampleRepo::insert(&self.pool, record).await?;
        tracing::debug!(id = %record.id, timestamp = record.timestamp, "Sample row inserted");
        Ok(())
    }

    async fn get_latest(&self) -> Result<Option<StoredSample>, TableError> {
        Ok(SampleRepo::latest(&self.pool).await?)
    }
}
