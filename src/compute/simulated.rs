//! Simulated Computation
//!
//! Stands in for an expensive backend call: waits a fixed delay and then
//! renders a message derived only from the key.

use std::time::Duration;

use tracing::debug;

/// A labelled computation with fixed latency.
#[derive(Debug, Clone)]
pub struct SimulatedComputation {
    label: String,
    delay: Duration,
}

impl SimulatedComputation {
    pub fn new(label: impl Into<String>, delay: Duration) -> Self {
        Self {
            label: label.into(),
            delay,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Produces the value for `key`. Must be called without any cache lock held.
    pub async fn run(&self, key: &str) -> String {
        debug!(label = %self.label, key, delay_ms = self.delay.as_millis() as u64, "Running computation");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        format!("{} message {}", self.label, key)
    }
}
