//! Sample storage for the sensorwatch pipeline.
//!
//! - [`SampleTable`]: the put / get-latest capability.
//! - [`PgSampleTable`]: Postgres-backed table over [`SampleRepo`].
//! - [`MemoryTable`]: in-process table used in tests and local runs.

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod models;
pub mod pg_table;
pub mod repositories;
pub mod table;

pub use memory::MemoryTable;
pub use models::sample::StoredSample;
pub use pg_table::PgSampleTable;
pub use repositories::SampleRepo;
pub use table::{SampleTable, TableError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
///
/// The monitor and ingest handlers are short-lived, so the pool stays small.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
