use crate::common::clock::Clock;
use crate::common::error::ServiceResult;
use crate::settings::POLL_TIMEOUT_CEILING_SECS;
use chrono::{DateTime, Utc};
use std::time::Duration;

pub const POLL_INTERVAL: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Changed,
    Unchanged { last_changed_at: DateTime<Utc> },
}

/// Requested timeout in seconds, bounded to `[1, max]`. Missing requests
/// wait the full `max`; zero and negative requests wait one second.
pub fn clamp_timeout(requested: Option<i64>, max: Duration) -> Duration {
    let max_secs = max.as_secs().clamp(1, POLL_TIMEOUT_CEILING_SECS);
    let secs = requested.map_or(max_secs, |secs| secs.clamp(1, max_secs as i64) as u64);
    Duration::from_secs(secs)
}

/// Re-reads the watermark through `changed_at` until it moves past `since`
/// or `timeout` elapses on the monotonic clock. The final check happens at
/// the deadline itself.
pub async fn wait_for_change<F, Fut>(
    clock: &dyn Clock,
    since: DateTime<Utc>,
    timeout: Duration,
    mut changed_at: F,
) -> ServiceResult<PollOutcome>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ServiceResult<DateTime<Utc>>>,
{
    let deadline = clock.monotonic() + timeout;
    loop {
        let last_changed_at = changed_at().await?;
        if last_changed_at > since {
            return Ok(PollOutcome::Changed);
        }
        let now = clock.monotonic();
        if now >= deadline {
            return Ok(PollOutcome::Unchanged { last_changed_at });
        }
        clock.sleep(POLL_INTERVAL.min(deadline - now)).await;
    }
}
