//! In-process channel backed by a `tokio::sync::broadcast` channel.
//!
//! [`MemoryChannel`] fans every published [`ChannelMessage`] out to live
//! subscribers and also keeps a log of everything it accepted, so tests can
//! inspect what a component emitted without racing a receiver.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};

use crate::channel::{Channel, ChannelError};

// ---------------------------------------------------------------------------
// ChannelMessage
// ---------------------------------------------------------------------------

/// A message accepted by a [`MemoryChannel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMessage {
    pub topic: String,
    pub payload: String,
    /// When the message was accepted (UTC).
    pub published_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// MemoryChannel
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out channel.
///
/// # Usage
///
/// ```rust
/// use sensorwatch_events::MemoryChannel;
///
/// let channel = MemoryChannel::default();
/// let _rx = channel.subscribe();
/// assert!(!channel.is_closed());
/// ```
pub struct MemoryChannel {
    sender: broadcast::Sender<ChannelMessage>,
    log: RwLock<Vec<ChannelMessage>>,
    connected: AtomicBool,
    closed: AtomicBool,
}

impl MemoryChannel {
    /// Create a channel with a specific broadcast capacity.
    ///
    /// Slow receivers observe `RecvError::Lagged` once the buffer is full.
    /// The message log is unbounded.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            log: RwLock::new(Vec::new()),
            connected: AtomicBool::new(true),
            closed: AtomicBool::new(false),
        }
    }

    /// Subscribe to all messages published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ChannelMessage> {
        self.sender.subscribe()
    }

    /// Simulate the remote end dropping the connection.
    ///
    /// Subsequent publishes fail with [`ChannelError::Closed`].
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    /// Whether [`Channel::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Snapshot of every message accepted so far, oldest first.
    pub async fn published(&self) -> Vec<ChannelMessage> {
        self.log.read().await.clone()
    }

    /// Messages accepted on a single topic, oldest first.
    pub async fn published_on(&self, topic: &str) -> Vec<ChannelMessage> {
        self.log
            .read()
            .await
            .iter()
            .filter(|m| m.topic == topic)
            .cloned()
            .collect()
    }
}

impl Default for MemoryChannel {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl Channel for MemoryChannel {
    async fn publish(&self, topic: &str, message: &str) -> Result<(), ChannelError> {
        if self.is_closed() || !self.connected.load(Ordering::SeqCst) {
            return Err(ChannelError::Closed);
        }

        let msg = ChannelMessage {
            topic: topic.to_string(),
            payload: message.to_string(),
            published_at: Utc::now(),
        };
        self.log.write().await.push(msg.clone());

        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(msg);
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
