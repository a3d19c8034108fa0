//! The publish capability every transport implements.

use async_trait::async_trait;

/// Error type for channel operations.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The transport could not be reached at startup.
    #[error("Failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },

    /// A WebSocket send or close failed mid-session.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Channel endpoint returned HTTP {0}")]
    HttpStatus(u16),

    /// The outgoing frame could not be encoded.
    #[error("Failed to encode frame: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The channel was closed or disconnected before the publish.
    #[error("Channel is closed")]
    Closed,
}

/// A topic-addressed, publish-only message channel.
///
/// Implementations are constructed explicitly by the binaries and passed
/// down, so tests can substitute [`MemoryChannel`](crate::MemoryChannel).
/// Delivery is at-least-once at best; callers never retry.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Publish one message to `topic`.
    async fn publish(&self, topic: &str, message: &str) -> Result<(), ChannelError>;

    /// Release the underlying connection.
    ///
    /// Publishing after `close` fails with [`ChannelError::Closed`].
    async fn close(&self) -> Result<(), ChannelError> {
        Ok(())
    }
}
