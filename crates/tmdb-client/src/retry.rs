//! Retry policy and the sleep seam used between attempts.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::FetcherConfig;

/// Fixed-interval retry: no growth, no jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first, at least 1
    pub max_attempts: u32,
    /// Wait between two attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }
}

impl From<&FetcherConfig> for RetryPolicy {
    fn from(config: &FetcherConfig) -> Self {
        Self::new(config.attempts(), config.backoff())
    }
}

/// Waits between attempts; swapped out in tests to avoid real delays
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
