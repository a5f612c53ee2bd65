//! Politeness gate between page fetches
//!
//! The crawler fetches one page at a time; this gate enforces a fixed pause
//! between the end of one page's processing and the start of the next
//! fetch. The first fetch never waits and nothing is awaited after the last
//! one.

use std::time::Duration;
use tokio::time::Instant;

/// Enforces a fixed pause between consecutive requests
#[derive(Debug)]
pub struct Politeness {
    /// Pause between the end of one request and the start of the next
    delay: Duration,

    /// When the previous request finished
    last_finished: Option<Instant>,
}

impl Politeness {
    /// Creates a gate with the given pause
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_finished: None,
        }
    }

    /// Creates a gate from a delay in (possibly fractional) seconds
    ///
    /// Negative or non-finite values disable the delay.
    pub fn from_secs_f64(seconds: f64) -> Self {
        let delay = Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO);
        Self::new(delay)
    }

    /// Time still to wait before the next request may start
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_finished {
            Some(last) => (last + self.delay).saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    /// Waits until the next request may start
    pub async fn wait_turn(&self) {
        let wait = self.remaining(Instant::now());
        if !wait.is_zero() {
            tracing::trace!("Politeness delay: sleeping {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Marks the current request as finished; the next pause starts now
    pub fn mark_done(&mut self) {
        self.last_finished = Some(Instant::now());
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
