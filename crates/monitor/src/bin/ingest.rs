//! `sensorwatch-ingest` -- store sensor channel payloads.
//!
//! Reads one payload per line from stdin (JSON or `key:value` text) and
//! writes each to the `sensor_samples` table. Every line is an independent
//! invocation: a rejected line is logged and the rest still run, but the
//! process exits with status 1 if any line failed.
//!
//! Requires `DATABASE_URL`.

use tokio::io::{AsyncBufReadExt, BufReader};

use sensorwatch_db::PgSampleTable;
use sensorwatch_monitor::config::IngestConfig;
use sensorwatch_monitor::ingest;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sensorwatch_monitor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(0) => {}
        Ok(failed) => {
            tracing::error!(failed, "Some payloads were not stored");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Ingest failed");
            std::process::exit(1);
        }
    }
}

/// Returns the number of lines that failed.
async fn run() -> anyhow::Result<usize> {
    let config = IngestConfig::from_env()?;

    let pool = sensorwatch_db::create_pool(&config.database_url).await?;
    sensorwatch_db::health_check(&pool).await?;
    sensorwatch_db::run_migrations(&pool).await?;

    let table = PgSampleTable::new(pool);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stored = 0usize;
    let mut failed = 0usize;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match ingest::handle(&table, &line).await {
            Ok(response) => {
                stored += 1;
                println!("{}", serde_json::to_string(&response)?);
            }
            Err(e) => {
                failed += 1;
                tracing::error!(error = %e, payload = %line, "Payload not stored");
            }
        }
    }

    tracing::info!(stored, failed, "Ingest finished");
    Ok(failed)
}
