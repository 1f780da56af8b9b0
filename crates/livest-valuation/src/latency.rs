//! Simulated latency
//!
//! The product pauses before answering so the result feels computed. The
//! pause is a strategy so tests and scripts can skip it.

use async_trait::async_trait;
use std::time::Duration;

/// Non-blocking pause before a result resolves
#[async_trait]
pub trait Latency: Send + Sync {
    /// Suspend the calling task; other tasks keep running
    async fn pause(&self);

    /// Nominal pause length
    fn duration(&self) -> Duration;
}

/// Sleeps on the tokio timer for a fixed duration
#[derive(Debug, Clone, Copy)]
pub struct FixedLatency {
    duration: Duration,
}

impl FixedLatency {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

#[async_trait]
impl Latency for FixedLatency {
    async fn pause(&self) {
        if !self.duration.is_zero() {
            tokio::time::sleep(self.duration).await;
        }
    }

    fn duration(&self) -> Duration {
        self.duration
    }
}

/// Resolves immediately
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn pause(&self) {}

    fn duration(&self) -> Duration {
        Duration::ZERO
    }
}

/// Pick a latency strategy for a configured duration
pub fn for_duration(duration: Duration) -> std::sync::Arc<dyn Latency> {
    if duration.is_zero() {
        std::sync::Arc::new(NoLatency)
    } else {
        std::sync::Arc::new(FixedLatency::new(duration))
    }
}
