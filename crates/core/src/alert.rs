//! Temperature alert raised when the latest sample crosses the threshold.

use serde::Serialize;

use crate::types::EpochSecs;

/// A single threshold violation. Created transiently, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// Human-readable message published to the alert channel.
    pub message: String,
    /// The threshold that was exceeded.
    pub threshold: f64,
    /// The observed temperature that triggered the alert.
    pub temperature: f64,
    /// Timestamp of the offending sample.
    pub timestamp: EpochSecs,
}

impl Alert {
    pub fn temperature_exceeded(temperature: f64, threshold: f64, timestamp: EpochSecs) -> Self {
        Self {
            message: format!("Alert: current temperature is {temperature}°C"),
            threshold,
            temperature,
            timestamp,
        }
    }
}
