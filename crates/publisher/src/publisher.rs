//! Periodic sample publish loop.
//!
//! Generates one sample per tick via [`SampleGenerator`] and publishes it
//! as JSON to the sensor topic. A publish failure ends the loop; there is
//! no retry and no reconnect. The channel is closed on every exit path.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::MissedTickBehavior;

use sensorwatch_core::{CoreError, Sample};
use sensorwatch_events::{Channel, ChannelError};

use crate::generator::SampleGenerator;

/// Upper bound on releasing the channel once the loop has stopped.
pub const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Error type for the publish loop.
#[derive(Debug, thiserror::Error)]
pub enum PublisherError {
    #[error("Failed to publish sample: {0}")]
    Channel(#[from] ChannelError),

    #[error("Failed to encode sample: {0}")]
    Serialize(#[from] CoreError),

    #[error("Publish interval must be greater than zero")]
    ZeroInterval,
}

/// Run the publish loop until `shutdown` resolves or a publish fails.
///
/// The first sample goes out immediately, then one per `interval`. A publish
/// that overruns the interval delays the next tick instead of queueing
/// catch-up ticks. `shutdown` also interrupts a publish that is in flight.
/// The channel is closed on every exit path, bounded by [`CLOSE_TIMEOUT`].
/// Returns the number of samples published.
pub async fn run<C, R, F>(
    channel: &C,
    topic: &str,
    interval: Duration,
    generator: &mut SampleGenerator<R>,
    shutdown: F,
) -> Result<u64, PublisherError>
where
    C: Channel + ?Sized,
    R: Rng,
    F: Future<Output = ()>,
{
    let outcome = if interval.is_zero() {
        Err(PublisherError::ZeroInterval)
    } else {
        tracing::info!(topic, interval_secs = interval.as_secs_f64(), "Publisher started");
        publish_loop(channel, topic, interval, generator, shutdown).await
    };

    match tokio::time::timeout(CLOSE_TIMEOUT, channel.close()).await {
        Ok(Ok(())) => tracing::info!("Sensor channel released"),
        Ok(Err(e)) => tracing::warn!(error = %e, "Failed to close sensor channel"),
        Err(_) => tracing::warn!(
            timeout_secs = CLOSE_TIMEOUT.as_secs(),
            "Timed out closing sensor channel"
        ),
    }

    outcome
}

async fn publish_loop<C, R, F>(
    channel: &C,
    topic: &str,
    interval: Duration,
    generator: &mut SampleGenerator<R>,
    shutdown: F,
) -> Result<u64, PublisherError>
where
    C: Channel + ?Sized,
    R: Rng,
    F: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut published: u64 = 0;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => {
                tracing::info!(published, "Interrupted, stopping publisher");
                return Ok(published);
            }
            _ = ticker.tick() => {}
        }

        let sample = generator.generate();
        tokio::select! {
            biased;
            () = &mut shutdown => {
                tracing::info!(published, "Interrupted during publish, stopping publisher");
                return Ok(published);
            }
            result = publish_sample(channel, topic, &sample) => {
                if let Err(e) = result {
                    tracing::error!(error = %e, published, "Publish failed, stopping publisher");
                    return Err(e);
                }
                published += 1;
            }
        }
    }
}

/// Encode one sample and publish it to `topic`.
pub async fn publish_sample<C>(channel: &C, topic: &str, sample: &Sample) -> Result<(), PublisherError>
where
    C: Channel + ?Sized,
{
    let payload = sample.to_payload()?;
    channel.publish(topic, &payload).await?;
    tracing::info!(
        topic,
        temperature = sample.temperature,
        humidity = sample.humidity,
        timestamp = sample.timestamp,
        "Sample published",
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use sensorwatch_events::MemoryChannel;

    use super::*;

    #[tokio::test]
    async fn publish_sample_sends_json_payload() {
        let channel = MemoryChannel::default();
        let sample = Sample::new(22.5, 47.25, 1_700_000_000);

        publish_sample(&channel, "bakery/sensors", &sample).await.unwrap();

        let sent = channel.published_on("bakery/sensors").await;
        assert_eq!(sent.len(), 1);
        let parsed = Sample::parse_payload(&sent[0].payload, 0).unwrap();
        assert_eq!(parsed, sample);
    }

    #[tokio::test]
    async fn publish_sample_propagates_channel_failure() {
        let channel = MemoryChannel::default();
        channel.disconnect();

        let err = publish_sample(&channel, "t", &Sample::new(21.0, 50.0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, PublisherError::Channel(ChannelError::Closed)));
    }

    #[tokio::test]
    async fn zero_interval_is_rejected_and_channel_released() {
        let channel = MemoryChannel::default();
        let mut generator = SampleGenerator::from_os_rng();

        let err = run(
            &channel,
            "t",
            Duration::ZERO,
            &mut generator,
            std::future::pending::<()>(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PublisherError::ZeroInterval));
        assert!(channel.published().await.is_empty());
        assert!(channel.is_closed());
    }
}
