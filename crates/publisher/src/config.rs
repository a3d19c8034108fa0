use std::time::Duration;

use sensorwatch_core::env;
use sensorwatch_core::topics::{DEFAULT_CLIENT_ID, DEFAULT_SENSOR_TOPIC};
use sensorwatch_core::CoreError;

/// Default interval between published samples.
pub const DEFAULT_INTERVAL_SECS: u64 = 10;

/// Default sensor gateway endpoint.
pub const DEFAULT_WS_URL: &str = "ws://localhost:8080/sensors";

/// Publisher configuration loaded from environment variables.
///
/// | Env Var                 | Default                         |
/// |-------------------------|---------------------------------|
/// | `SENSOR_WS_URL`         | `ws://localhost:8080/sensors`   |
/// | `SENSOR_TOPIC`          | `bakery/sensors`                |
/// | `SENSOR_CLIENT_ID`      | `bakery_sensor_client`          |
/// | `PUBLISH_INTERVAL_SECS` | `10`                            |
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    pub ws_url: String,
    pub topic: String,
    pub client_id: String,
    pub interval: Duration,
}

impl PublisherConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        let interval_secs: u64 = env::parse_or("PUBLISH_INTERVAL_SECS", DEFAULT_INTERVAL_SECS)?;
        if interval_secs == 0 {
            return Err(CoreError::Config(
                "PUBLISH_INTERVAL_SECS must be greater than zero".into(),
            ));
        }

        Ok(Self {
            ws_url: env::string_or("SENSOR_WS_URL", DEFAULT_WS_URL),
            topic: env::string_or("SENSOR_TOPIC", DEFAULT_SENSOR_TOPIC),
            client_id: env::string_or("SENSOR_CLIENT_ID", DEFAULT_CLIENT_ID),
            interval: Duration::from_secs(interval_secs),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
