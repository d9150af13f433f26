//! Monotonic clock shared by the drivers and the UI loop.
//!
//! Derived from `tokio::time::Instant`, so tests running on tokio's paused
//! clock see exact, repeatable timestamps.

use platform::Instant;
use tokio::time::Duration;

/// Milliseconds-since-start clock producing [`platform::Instant`]s.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin: tokio::time::Instant,
}

impl Clock {
    /// Clock whose zero is now.
    pub fn start() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }

    /// Current time as seen by the input core.
    pub fn now(&self) -> Instant {
        let micros = u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX);
        Instant::from_micros(micros)
    }

    /// Whole milliseconds since start.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Sleep until `ms` milliseconds after start.
    pub async fn sleep_until_ms(&self, ms: u64) {
        if let Some(deadline) = self.origin.checked_add(Duration::from_millis(ms)) {
            tokio::time::sleep_until(deadline).await;
        }
    }
}
