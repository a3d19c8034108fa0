//! Synthetic sensor sample and its wire payload.
//!
//! A [`Sample`] is one temperature / humidity reading. The publisher emits
//! it as JSON; ingestion also accepts the flat `key:value` text form
//! (`temperature:21.37,humidity:48.02`) that early sensor clients sent.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::EpochSecs;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Range generated temperatures are drawn from (°C).
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 20.0..=30.0;

/// Range generated relative humidity values are drawn from (%).
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 40.0..=60.0;

/// Physically valid relative humidity (%).
const VALID_HUMIDITY: RangeInclusive<f64> = 0.0..=100.0;

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// One sensor reading. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Seconds since the Unix epoch.
    pub timestamp: EpochSecs,
}

impl Sample {
    pub fn new(temperature: f64, humidity: f64, timestamp: EpochSecs) -> Self {
        Self {
            temperature,
            humidity,
            timestamp,
        }
    }

    /// Check that the reading is physically plausible on its own.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.temperature.is_finite() {
            return Err(CoreError::Validation(format!(
                "temperature must be finite, got {}",
                self.temperature
            )));
        }
        if !self.humidity.is_finite() || !VALID_HUMIDITY.contains(&self.humidity) {
            return Err(CoreError::Validation(format!(
                "humidity must be within 0-100%, got {}",
                self.humidity
            )));
        }
        if self.timestamp < 0 {
            return Err(CoreError::Validation(format!(
                "timestamp must not be negative, got {}",
                self.timestamp
            )));
        }
        Ok(())
    }

    /// Serialize to the JSON wire payload.
    pub fn to_payload(&self) -> Result<String, CoreError> {
        serde_json::to_string(self).map_err(|e| CoreError::Payload(e.to_string()))
    }

    /// Parse a wire payload, JSON or flat text.
    ///
    /// `received_at` fills in the timestamp when the payload has none.
    /// The result is validated before it is returned.
    pub fn parse_payload(payload: &str, received_at: EpochSecs) -> Result<Self, CoreError> {
        let trimmed = payload.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Payload("empty payload".into()));
        }

        let sample = if trimmed.starts_with('{') {
            parse_json(trimmed, received_at)?
        } else {
            parse_flat(trimmed, received_at)?
        };

        sample.validate()?;
        Ok(sample)
    }
}

/// Round to two decimal places, the precision sensors report at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Payload parsing
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonPayload {
    temperature: f64,
    humidity: f64,
    timestamp: Option<EpochSecs>,
}

fn parse_json(payload: &str, received_at: EpochSecs) -> Result<Sample, CoreError> {
    let raw: JsonPayload =
        serde_json::from_str(payload).map_err(|e| CoreError::Payload(e.to_string()))?;
    Ok(Sample::new(
        raw.temperature,
        raw.humidity,
        raw.timestamp.unwrap_or(received_at),
    ))
}

fn parse_flat(payload: &str, received_at: EpochSecs) -> Result<Sample, CoreError> {
    let mut temperature = None;
    let mut humidity = None;
    let mut timestamp = None;

    for pair in payload.split(',') {
        let (key, value) = pair
            .split_once(':')
            .ok_or_else(|| CoreError::Payload(format!("expected key:value, got '{pair}'")))?;
        let (key, value) = (key.trim(), value.trim());
        match key {
            "temperature" => set_once(&mut temperature, key, parse_number(key, value)?)?,
            "humidity" => set_once(&mut humidity, key, parse_number(key, value)?)?,
            "timestamp" => {
                let parsed = value.parse::<EpochSecs>().map_err(|_| {
                    CoreError::Payload(format!("timestamp is not an integer: '{value}'"))
                })?;
                set_once(&mut timestamp, key, parsed)?
            }
            other => return Err(CoreError::Payload(format!("unknown field '{other}'"))),
        }
    }

    match (temperature, humidity) {
        (Some(t), Some(h)) => Ok(Sample::new(t, h, timestamp.unwrap_or(received_at))),
        (None, _) => Err(CoreError::Payload("missing field 'temperature'".into())),
        (_, None) => Err(CoreError::Payload("missing field 'humidity'".into())),
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, CoreError> {
    value
        .parse::<f64>()
        .map_err(|_| CoreError::Payload(format!("{key} is not a number: '{value}'")))
}

fn set_once<T>(slot: &mut Option<T>, key: &str, value: T) -> Result<(), CoreError> {
    if slot.is_some() {
        return Err(CoreError::Payload(format!("duplicate field '{key}'")));
    }
    *slot = Some(value);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const NOW: EpochSecs = 1_700_000_000;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(21.456), 21.46);
        assert_eq!(round2(30.0), 30.0);
        assert_eq!(round2(19.999), 20.0);
    }

    #[test]
    fn parse_json_payload_with_timestamp() {
        let s = Sample::parse_payload(
            r#"{"temperature":26.5,"humidity":51.2,"timestamp":1600000000}"#,
            NOW,
        )
        .unwrap();
        assert_eq!(s, Sample::new(26.5, 51.2, 1_600_000_000));
    }

    #[test]
    fn parse_json_payload_defaults_timestamp() {
        let s = Sample::parse_payload(r#"{"temperature":21.0,"humidity":45.0}"#, NOW).unwrap();
        assert_eq!(s.timestamp, NOW);
    }

    #[test]
    fn parse_flat_payload() {
        let s = Sample::parse_payload("temperature:22.75, humidity:58.1", NOW).unwrap();
        assert_eq!(s, Sample::new(22.75, 58.1, NOW));
    }

    #[test]
    fn parse_flat_payload_missing_humidity() {
        assert_matches!(
            Sample::parse_payload("temperature:22.75", NOW),
            Err(CoreError::Payload(msg)) if msg.contains("humidity")
        );
    }

    #[test]
    fn parse_flat_payload_unknown_field() {
        assert_matches!(
            Sample::parse_payload("temperature:22.0,humidity:50.0,pressure:1013", NOW),
            Err(CoreError::Payload(_))
        );
    }

    #[test]
    fn parse_rejects_duplicate_fields() {
        assert_matches!(
            Sample::parse_payload("temperature:21,temperature:29,humidity:50", NOW),
            Err(CoreError::Payload(msg)) if msg.contains("duplicate field 'temperature'")
        );
        assert_matches!(
            Sample::parse_payload("temperature:21,humidity:50,timestamp:5,timestamp:6", NOW),
            Err(CoreError::Payload(msg)) if msg.contains("timestamp")
        );
        assert_matches!(
            Sample::parse_payload(r#"{"temperature":21,"temperature":29,"humidity":50}"#, NOW),
            Err(CoreError::Payload(_))
        );
    }

    #[test]
    fn parse_rejects_empty_and_garbage() {
        assert_matches!(Sample::parse_payload("   ", NOW), Err(CoreError::Payload(_)));
        assert_matches!(Sample::parse_payload("{not json", NOW), Err(CoreError::Payload(_)));
        assert_matches!(
            Sample::parse_payload("temperature:hot,humidity:50", NOW),
            Err(CoreError::Payload(_))
        );
    }

    #[test]
    fn parse_rejects_implausible_humidity() {
        assert_matches!(
            Sample::parse_payload(r#"{"temperature":21.0,"humidity":140.0}"#, NOW),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn validate_rejects_negative_timestamp() {
        assert!(Sample::new(21.0, 50.0, -1).validate().is_err());
        assert!(Sample::new(21.0, 50.0, 0).validate().is_ok());
    }

    #[test]
    fn payload_is_flat_json() {
        let json = Sample::new(24.0, 50.5, NOW).to_payload().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["temperature"], 24.0);
        assert_eq!(parsed["humidity"], 50.5);
        assert_eq!(parsed["timestamp"], NOW);
    }
}
