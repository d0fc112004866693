use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Source of wall-clock timestamps for events and of monotonic time for
/// deadlines. Everything that needs "now" goes through this.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;

    /// Time elapsed since the clock was created. Never goes backwards.
    fn monotonic(&self) -> Duration;

    async fn sleep(&self, duration: Duration);
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn monotonic(&self) -> Duration {
        self.origin.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}

/// Virtual clock for tests: time only moves through [`ManualClock::advance`]
/// or [`Clock::sleep`], which returns immediately after advancing.
pub struct ManualClock {
    inner: Mutex<ManualTime>,
}

struct ManualTime {
    wall: DateTime<Utc>,
    elapsed: Duration,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            inner: Mutex::new(ManualTime {
                wall: start,
                elapsed: Duration::ZERO,
            }),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut time = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        time.elapsed += duration;
        time.wall += TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX);
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).wall
    }

    fn monotonic(&self) -> Duration {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).elapsed
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_manual_clock_sleep_advances_both_clocks() {
        let start = DateTime::UNIX_EPOCH;
        let clock = ManualClock::new(start);
        clock.sleep(Duration::from_millis(800)).await;
        assert_eq!(clock.monotonic(), Duration::from_millis(800));
        assert_eq!(clock.now_utc(), start + TimeDelta::milliseconds(800));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.monotonic();
        let b = clock.monotonic();
        assert!(b >= a);
    }
}
