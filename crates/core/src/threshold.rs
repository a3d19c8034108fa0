//! Threshold evaluation for sensor samples.
//!
//! Pure logic with no storage access. The caller fetches the latest sample
//! and passes it in.

use crate::alert::Alert;
use crate::sample::Sample;

/// Temperature (°C) above which an alert is raised.
pub const TEMPERATURE_THRESHOLD: f64 = 25.0;

/// Evaluate one sample against a temperature threshold.
///
/// Returns an alert only when the temperature is strictly above the
/// threshold. Holds no state: identical high readings alert every time.
pub fn evaluate(sample: &Sample, threshold: f64) -> Option<Alert> {
    if sample.temperature > threshold {
        Some(Alert::temperature_exceeded(
            sample.temperature,
            threshold,
            sample.timestamp,
        ))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
