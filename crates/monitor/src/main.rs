//! `sensorwatch-monitor` -- one-shot temperature threshold check.
//!
//! Reads the latest sample from Postgres and posts an alert to the
//! webhook if its temperature is above the threshold. Prints the response
//! as JSON on stdout. An empty table is a failure (exit status 1).
//!
//! See [`MonitorConfig`](sensorwatch_monitor::config::MonitorConfig) for the
//! environment variables.

use sensorwatch_db::PgSampleTable;
use sensorwatch_events::WebhookChannel;
use sensorwatch_monitor::config::MonitorConfig;
use sensorwatch_monitor::Monitor;

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

    if let Err(e) = run().await {
        tracing::error!(error = %format!("{e:#}"), "Monitor invocation failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = MonitorConfig::from_env()?;

    let pool = sensorwatch_db::create_pool(&config.database_url).await?;
    sensorwatch_db::health_check(&pool).await?;
    sensorwatch_db::run_migrations(&pool).await?;
    tracing::debug!("Database ready");

    let table = PgSampleTable::new(pool);
    let alerts = WebhookChannel::new(config.webhook_url.clone())?;
    let monitor = Monitor::default();

    let response = monitor.invoke(&table, &alerts, &config.alert_topic).await?;

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
