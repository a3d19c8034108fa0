//! WebSocket transport for sensor samples.
//!
//! [`WsChannel`] holds one connection to the ingestion gateway and sends
//! each publish as a JSON text frame:
//!
//! ```json
//! {"type":"publish","client_id":"bakery_sensor_client","topic":"bakery/sensors","payload":"..."}
//! ```
//!
//! There is no reconnect: a dropped connection surfaces as an error on the
//! next publish and the caller decides whether that is fatal.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use futures::SinkExt;
use serde::Serialize;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use sensorwatch_core::topics::FRAME_TYPE_PUBLISH;

use crate::channel::{Channel, ChannelError};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Outgoing publish frame.
#[derive(Debug, Serialize)]
struct PublishFrame<'a> {
    r#type: &'static str,
    client_id: &'a str,
    topic: &'a str,
    payload: &'a str,
}

/// A connected WebSocket publish channel.
#[derive(Debug)]
pub struct WsChannel {
    client_id: String,
    stream: Mutex<WsStream>,
    closed: AtomicBool,
}

impl WsChannel {
    /// Open the connection. Failure here is fatal for the caller.
    pub async fn connect(url: &str, client_id: impl Into<String>) -> Result<Self, ChannelError> {
        tracing::info!(url = %url, "Connecting to sensor WebSocket");

        let (stream, _response) = connect_async(url)
            .await
            .map_err(|source| ChannelError::Connect {
                url: url.to_string(),
                source,
            })?;

        tracing::info!("Sensor WebSocket connected");

        Ok(Self {
            client_id: client_id.into(),
            stream: Mutex::new(stream),
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl Channel for WsChannel {
    async fn publish(&self, topic: &str, message: &str) -> Result<(), ChannelError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ChannelError::Closed);
        }

        let frame = PublishFrame {
            r#type: FRAME_TYPE_PUBLISH,
            client_id: &self.client_id,
            topic,
            payload: message,
        };
        let json = serde_json::to_string(&frame)?;

        tracing::debug!(topic, "Sending publish frame");
        self.stream.lock().await.send(Message::Text(json)).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), ChannelError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        tracing::info!("Closing sensor WebSocket");
        self.stream.lock().await.close(None).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use futures::StreamExt;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;
    use tokio_tungstenite::accept_async;

    use super::*;

    /// Accept one WebSocket client and forward every text frame it sends.
    async fn spawn_gateway() -> (String, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(tcp).await.unwrap();
            while let Some(Ok(msg)) = ws.next().await {
                match msg {
                    Message::Text(text) => {
                        let _ = tx.send(text.to_string());
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        });

        (format!("ws://{addr}"), rx)
    }

    #[tokio::test]
    async fn publish_sends_json_frame() {
        let (url, mut rx) = spawn_gateway().await;
        let channel = WsChannel::connect(&url, "test-client").await.unwrap();

        channel
            .publish("bakery/sensors", r#"{"temperature":21.5}"#)
            .await
            .unwrap();

        let frame: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(frame["type"], "publish");
        assert_eq!(frame["client_id"], "test-client");
        assert_eq!(frame["topic"], "bakery/sensors");
        assert_eq!(frame["payload"], r#"{"temperature":21.5}"#);
    }

    #[tokio::test]
    async fn publish_after_close_fails() {
        let (url, _rx) = spawn_gateway().await;
        let channel = WsChannel::connect(&url, "test-client").await.unwrap();

        channel.close().await.unwrap();
        // Closing twice is a no-op.
        channel.close().await.unwrap();

        assert_matches!(channel.publish("t", "m").await, Err(ChannelError::Closed));
    }

    #[tokio::test]
    async fn connect_to_unreachable_endpoint_fails() {
        // Bind then drop to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = WsChannel::connect(&format!("ws://{addr}"), "test-client").await;
        assert_matches!(result, Err(ChannelError::Connect { .. }));
    }
}
