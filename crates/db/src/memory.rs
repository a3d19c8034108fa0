//! In-process [`SampleTable`] backed by a `Vec`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::sample::StoredSample;
use crate::table::{SampleTable, TableError};

/// In-memory sample table.
///
/// Keeps rows in insertion order; `get_latest` still resolves recency by
/// timestamp so it behaves like the Postgres table.
#[derive(Debug, Default)]
pub struct MemoryTable {
    rows: RwLock<Vec<StoredSample>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Snapshot of all rows in insertion order.
    pub async fn rows(&self) -> Vec<StoredSample> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl SampleTable for MemoryTable {
    async fn put(&self, record: &StoredSample) -> Result<(), TableError> {
        self.rows.write().await.push(record.clone());
        Ok(())
    }

    async fn get_latest(&self) -> Result<Option<StoredSample>, TableError> {
        let rows = self.rows.read().await;
        // Insertion index is the last tie-breaker: later writes win.
        let latest = rows
            .iter()
            .enumerate()
            .max_by_key(|(idx, row)| (row.timestamp, row.ingested_at, *idx))
            .map(|(_, row)| row.clone());
        Ok(latest)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
