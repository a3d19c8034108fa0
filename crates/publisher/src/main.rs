//! `sensorwatch-publisher` -- synthetic sensor reading daemon.
//!
//! Generates a temperature / humidity sample on a fixed interval and
//! publishes it to the sensor gateway over WebSocket. Stops cleanly on
//! Ctrl-C or SIGTERM, closing the connection on the way out. A lost
//! connection is fatal.
//!
//! See [`PublisherConfig`](sensorwatch_publisher::config::PublisherConfig)
//! for the environment variables.

use sensorwatch_events::WsChannel;
use sensorwatch_publisher::config::PublisherConfig;
use sensorwatch_publisher::generator::SampleGenerator;
use sensorwatch_publisher::publisher;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sensorwatch_publisher=info,sensorwatch_events=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %format!("{e:#}"), "Publisher terminated");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = PublisherConfig::from_env()?;

    tracing::info!(
        ws_url = %config.ws_url,
        topic = %config.topic,
        client_id = %config.client_id,
        interval_secs = config.interval.as_secs(),
        "Starting sensorwatch-publisher",
    );

    let channel = WsChannel::connect(&config.ws_url, config.client_id.clone()).await?;
    let mut generator = SampleGenerator::from_os_rng();

    let published = publisher::run(
        &channel,
        &config.topic,
        config.interval,
        &mut generator,
        shutdown_signal(),
    )
    .await?;

    tracing::info!(published, "Publisher stopped");
    Ok(())
}

/// Wait for a termination signal.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). If a handler cannot
/// be installed the corresponding branch never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C)");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM");
        }
    }
}
