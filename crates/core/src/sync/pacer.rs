//! Inter-item pacing.
//!
//! The sync engine pauses between provider calls to respect external rate
//! limits. Pacing is a capability so tests can swap in a zero-delay fake.

use std::time::Duration;

use async_trait::async_trait;

use crate::constants::INTER_ITEM_DELAY_MS;

/// Pause strategy invoked between provider calls.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Fixed-delay pacer used in production.
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedDelayPacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(INTER_ITEM_DELAY_MS))
    }
}

#[async_trait]
impl Pacer for FixedDelayPacer {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Zero-delay pacer for tests.
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pause(&self) {}
}
