//! Threshold monitor.
//!
//! One evaluation per invocation: read the latest stored sample, compare
//! its temperature to the threshold, and publish an alert if it is above.
//! No state is kept between invocations, so repeated high readings alert
//! every time.

use serde::Serialize;

use sensorwatch_core::threshold::{self, TEMPERATURE_THRESHOLD};
use sensorwatch_core::Alert;
use sensorwatch_db::{SampleTable, TableError};
use sensorwatch_events::{Channel, ChannelError};

use crate::STATUS_OK;

/// Body returned when an invocation completes.
pub const MONITOR_OK_BODY: &str = "Monitoring complete";

/// Error type for a monitor invocation.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// There is no sample to evaluate. A default is never substituted.
    #[error("Sample table is empty")]
    EmptyTable,

    #[error("Failed to read latest sample: {0}")]
    Table(#[from] TableError),

    #[error("Failed to publish alert: {0}")]
    Channel(#[from] ChannelError),
}

/// Outcome of a successful invocation.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorResponse {
    pub status_code: u16,
    pub body: String,
    /// The alert that was published, if any.
    pub alert: Option<Alert>,
}

/// Evaluates the latest sample against a fixed temperature threshold.
#[derive(Debug, Clone, Copy)]
pub struct Monitor {
    threshold: f64,
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new(TEMPERATURE_THRESHOLD)
    }
}

impl Monitor {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Run one evaluation.
    ///
    /// Publishes at most one alert to `alert_topic` on `alerts`.
    pub async fn run<T, C>(
        &self,
        table: &T,
        alerts: &C,
        alert_topic: &str,
    ) -> Result<MonitorResponse, MonitorError>
    where
        T: SampleTable + ?Sized,
        C: Channel + ?Sized,
    {
        let latest = table.get_latest().await?.ok_or(MonitorError::EmptyTable)?;
        let sample = latest.sample();

        tracing::debug!(
            id = %latest.id,
            temperature = sample.temperature,
            timestamp = sample.timestamp,
            threshold = self.threshold,
            "Evaluating latest sample",
        );

        let alert = threshold::evaluate(&sample, self.threshold);
        if let Some(alert) = &alert {
            alerts.publish(alert_topic, &alert.message).await?;
            tracing::warn!(
                temperature = alert.temperature,
                threshold = alert.threshold,
                topic = alert_topic,
                "Temperature alert published",
            );
        } else {
            tracing::info!(temperature = sample.temperature, "Temperature within threshold");
        }

        Ok(MonitorResponse {
            status_code: STATUS_OK,
            body: MONITOR_OK_BODY.to_string(),
            alert,
        })
    }

    /// Run one evaluation, then release `alerts`.
    ///
    /// The evaluation result is returned as is; a failure to close the
    /// alert channel is only logged.
    pub async fn invoke<T, C>(
        &self,
        table: &T,
        alerts: &C,
        alert_topic: &str,
    ) -> Result<MonitorResponse, MonitorError>
    where
        T: SampleTable + ?Sized,
        C: Channel + ?Sized,
    {
        let outcome = self.run(table, alerts, alert_topic).await;
        if let Err(e) = alerts.close().await {
            tracing::warn!(error = %e, "Failed to close alert channel");
        }
        outcome
    }
}
