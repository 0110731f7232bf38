//! Time source for the completion waiter.

use std::time::{Duration, Instant};

use async_trait::async_trait;

/// Source of the current time and of sleeps.
///
/// Injected into the waiter so that polling and timeouts can be driven
/// deterministically in tests.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by the tokio timer.
///
/// `now` reads tokio's clock, so it follows `sleep` when time is paused.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
