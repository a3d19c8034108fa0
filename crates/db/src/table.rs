//! The key-value table capability shared by every storage backend.

use async_trait::async_trait;

use crate::models::sample::StoredSample;

/// Error type for table operations.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Append-only sample storage.
///
/// Rows are written once and never updated. The store is treated as
/// externally synchronized: one writer at a time.
#[async_trait]
pub trait SampleTable: Send + Sync {
    /// Write one row.
    async fn put(&self, record: &StoredSample) -> Result<(), TableError>;

    /// The row with the greatest `timestamp`, ties broken by the most
    /// recent `ingested_at`. `None` when the table is empty.
    async fn get_latest(&self) -> Result<Option<StoredSample>, TableError>;
}
