//! Publish/subscribe channels for the sensorwatch pipeline.
//!
//! - [`Channel`]: the publish capability shared by every transport.
//! - [`MemoryChannel`]: in-process channel backed by
//!   `tokio::sync::broadcast`, used in tests and local runs.
//! - [`WsChannel`]: WebSocket transport for sensor samples.
//! - [`WebhookChannel`]: HTTP POST transport for alerts.

pub mod bus;
pub mod channel;
pub mod webhook;
pub mod websocket;

pub use bus::{ChannelMessage, MemoryChannel};
pub use channel::{Channel, ChannelError};
pub use webhook::WebhookChannel;
pub use websocket::WsChannel;
