//! Synthetic sample generation.
//!
//! [`SampleGenerator`] draws temperature and humidity independently and
//! uniformly from the fixed sensor ranges and rounds them to two decimals.
//! The RNG is injected so tests can seed it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sensorwatch_core::sample::{round2, HUMIDITY_RANGE, TEMPERATURE_RANGE};
use sensorwatch_core::types::{now_epoch_secs, EpochSecs};
use sensorwatch_core::Sample;

/// Produces one [`Sample`] per call.
pub struct SampleGenerator<R = StdRng> {
    rng: R,
}

impl SampleGenerator<StdRng> {
    /// Generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> SampleGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a sample stamped with the current time.
    pub fn generate(&mut self) -> Sample {
        self.generate_at(now_epoch_secs())
    }

    /// Generate a sample stamped with `timestamp`.
    pub fn generate_at(&mut self, timestamp: EpochSecs) -> Sample {
        let temperature = round2(self.rng.random_range(TEMPERATURE_RANGE));
        let humidity = round2(self.rng.random_range(HUMIDITY_RANGE));
        Sample::new(temperature, humidity, timestamp)
    }
}
