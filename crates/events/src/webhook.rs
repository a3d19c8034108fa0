//! Webhook transport for alerts.
//!
//! [`WebhookChannel`] POSTs each published message as JSON to a fixed URL:
//! `{"topic": ..., "message": ..., "timestamp": ...}`. A single attempt is
//! made; failures are returned to the caller unretried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::channel::{Channel, ChannelError};

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers messages to an external webhook endpoint.
pub struct WebhookChannel {
    client: reqwest::Client,
    url: String,
    closed: AtomicBool,
}

impl WebhookChannel {
    /// Create a channel with a pre-configured HTTP client.
    pub fn new(url: impl Into<String>) -> Result<Self, ChannelError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            closed: AtomicBool::new(false),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Channel for WebhookChannel {
    async fn publish(&self, topic: &str, message: &str) -> Result<(), ChannelError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ChannelError::Closed);
        }

        let payload = serde_json::json!({
            "topic": topic,
            "message": message,
            "timestamp": Utc::now(),
        });

        let response = self.client.post(&self.url).json(&payload).send().await?;
        if !response.status().is_success() {
            tracing::error!(url = %self.url, status = response.status().as_u16(), "Webhook rejected message");
            return Err(ChannelError::HttpStatus(response.status().as_u16()));
        }

        tracing::debug!(url = %self.url, topic, "Webhook delivered");
        Ok(())
    }

    async fn close(&self) -> Result<(), ChannelError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use tokio::sync::mpsc;

    use super::*;

    /// Serve a single POST route that forwards bodies and answers `status`.
    async fn spawn_endpoint(status: StatusCode) -> (String, mpsc::UnboundedReceiver<serde_json::Value>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Router::new().route(
            "/alerts",
            post(move |Json(body): Json<serde_json::Value>| {
                let tx = tx.clone();
                async move {
                    let _ = tx.send(body);
                    status
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/alerts"), rx)
    }

    #[test]
    fn new_does_not_panic() {
        let channel = WebhookChannel::new("http://localhost:9/alerts").unwrap();
        assert_eq!(channel.url(), "http://localhost:9/alerts");
    }

    #[tokio::test]
    async fn publish_posts_json_body() {
        let (url, mut rx) = spawn_endpoint(StatusCode::OK).await;
        let channel = WebhookChannel::new(url).unwrap();

        channel
            .publish("temperature-alert", "Alert: current temperature is 26.5°C")
            .await
            .unwrap();

        let body = rx.recv().await.unwrap();
        assert_eq!(body["topic"], "temperature-alert");
        assert_eq!(body["message"], "Alert: current temperature is 26.5°C");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (url, _rx) = spawn_endpoint(StatusCode::BAD_GATEWAY).await;
        let channel = WebhookChannel::new(url).unwrap();

        assert_matches!(
            channel.publish("temperature-alert", "m").await,
            Err(ChannelError::HttpStatus(502))
        );
    }

    #[tokio::test]
    async fn closed_channel_rejects_publish() {
        let channel = WebhookChannel::new("http://localhost:9/alerts").unwrap();
        channel.close().await.unwrap();
        assert_matches!(channel.publish("t", "m").await, Err(ChannelError::Closed));
    }
}
