//! Well-known channel names and frame type discriminators.
//!
//! Used by the publisher when emitting samples, by the monitor when
//! emitting alerts, and by the WebSocket transport when framing messages.

/// Default topic for sensor samples.
pub const DEFAULT_SENSOR_TOPIC: &str = "bakery/sensors";

/// Default topic for temperature alerts.
pub const DEFAULT_ALERT_TOPIC: &str = "temperature-alert";

/// Default client identifier announced by the publisher.
pub const DEFAULT_CLIENT_ID: &str = "bakery_sensor_client";

/// WebSocket frame type discriminator for published messages.
pub const FRAME_TYPE_PUBLISH: &str = "publish";
