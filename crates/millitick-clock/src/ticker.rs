//! Fixed-period cyclic schedule over the wrapping timebase.
//!
//! [`Ticker`] produces due ticks on demand: the caller polls it with the
//! current instant and gets back how many periods have elapsed. It never
//! sleeps and never reads a clock; pair it with a
//! [`Clock`](crate::clock::Clock) and whatever waiting mechanism the host
//! loop uses.

use millitick_core::{TimeError, TimeResult, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What to do when more than one tick came due between polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissedTickPolicy {
    /// Report every missed tick so the caller can catch up.
    #[default]
    Burst,
    /// Report a single tick and count the rest as skipped.
    Skip,
}

/// Periodic schedule producing due ticks on demand.
///
/// The schedule is phase-aligned: the next fire instant always stays on the
/// grid `start + k * period`, so late polls do not drift it. Polls must
/// occur at least once per 2^31 ms (the half-range comparison window), and
/// the period must stay below 2^31 ms as well.
///
/// # Example
///
/// ```
/// use millitick_clock::{MissedTickPolicy, Ticker};
/// use millitick_core::Timestamp;
///
/// let period = Timestamp::from_millis(100);
/// let mut ticker = Ticker::new(Timestamp::ZERO, period, MissedTickPolicy::Burst).unwrap();
///
/// assert_eq!(ticker.poll(Timestamp::from_millis(50)), 0);
/// assert_eq!(ticker.poll(Timestamp::from_millis(100)), 1);
/// // Three periods late: all three reported under Burst.
/// assert_eq!(ticker.poll(Timestamp::from_millis(450)), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker {
    period: Timestamp,
    next_fire: Timestamp,
    policy: MissedTickPolicy,
    skipped: u64,
}

impl Ticker {
    /// Create a schedule whose first tick comes due one period after `now`.
    ///
    /// # Errors
    ///
    /// [`TimeError::ZeroPeriod`] if `period` is zero.
    pub fn new(now: Timestamp, period: Timestamp, policy: MissedTickPolicy) -> TimeResult<Self> {
        if period == Timestamp::ZERO {
            return Err(TimeError::ZeroPeriod);
        }
        Ok(Self {
            period,
            next_fire: now.wrapping_add(period),
            policy,
            skipped: 0,
        })
    }

    /// Number of ticks due at `now`, advancing the schedule past them.
    ///
    /// Constant-time in the gap length. Under [`MissedTickPolicy::Burst`]
    /// the exact due count is returned; under [`MissedTickPolicy::Skip`] at
    /// most one tick is reported and the remainder is added to
    /// [`Ticker::skipped`].
    pub fn poll(&mut self, now: Timestamp) -> u32 {
        if now.is_before(self.next_fire) {
            return 0;
        }

        let late = u64::from(now.wrapping_since(self.next_fire).as_millis());
        let period = u64::from(self.period.as_millis());
        let due = late / period + 1;
        self.next_fire = self
            .next_fire
            .wrapping_add(Timestamp::from_millis(due.wrapping_mul(period) as u32));

        match self.policy {
            // due is at most 2^32; saturate the pathological full-range gap.
            MissedTickPolicy::Burst => u32::try_from(due).unwrap_or(u32::MAX),
            MissedTickPolicy::Skip => {
                let missed = due - 1;
                if missed > 0 {
                    self.skipped += missed;
                    warn!(
                        missed,
                        period_ms = self.period.as_millis(),
                        "missed ticks skipped"
                    );
                }
                1
            }
        }
    }

    /// The configured period.
    #[must_use]
    pub const fn period(&self) -> Timestamp {
        self.period
    }

    /// The instant the next tick comes due.
    #[must_use]
    pub const fn next_fire(&self) -> Timestamp {
        self.next_fire
    }

    /// The configured missed-tick policy.
    #[must_use]
    pub const fn policy(&self) -> MissedTickPolicy {
        self.policy
    }

    /// Total ticks dropped under [`MissedTickPolicy::Skip`].
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Re-anchor the schedule at `now`, clearing skip accounting.
    pub fn reset(&mut self, now: Timestamp) {
        self.next_fire = now.wrapping_add(self.period);
        self.skipped = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticker(period_ms: u32, policy: MissedTickPolicy) -> Ticker {
        Ticker::new(Timestamp::ZERO, Timestamp::from_millis(period_ms), policy).unwrap()
    }

    #[test]
    fn test_zero_period_rejected() {
        let err = Ticker::new(Timestamp::ZERO, Timestamp::ZERO, MissedTickPolicy::Burst);
        assert_eq!(err.unwrap_err(), TimeError::ZeroPeriod);
    }

    #[test]
    fn test_nothing_due_before_first_period() {
        let mut t = ticker(100, MissedTickPolicy::Burst);
        assert_eq!(t.poll(Timestamp::from_millis(0)), 0);
        assert_eq!(t.poll(Timestamp::from_millis(99)), 0);
        assert_eq!(t.poll(Timestamp::from_millis(100)), 1);
    }

    #[test]
    fn test_burst_reports_every_missed_tick() {
        let mut t = ticker(100, MissedTickPolicy::Burst);
        assert_eq!(t.poll(Timestamp::from_millis(1_000)), 10);
        // Schedule stays on the grid.
        assert_eq!(t.next_fire().as_millis(), 1_100);
        assert_eq!(t.poll(Timestamp::from_millis(1_099)), 0);
        assert_eq!(t.poll(Timestamp::from_millis(1_100)), 1);
    }

    #[test]
    fn test_skip_reports_one_and_counts_the_rest() {
        let mut t = ticker(100, MissedTickPolicy::Skip);
        assert_eq!(t.poll(Timestamp::from_millis(1_000)), 1);
        assert_eq!(t.skipped(), 9);
        // Phase alignment preserved after the stall.
        assert_eq!(t.next_fire().as_millis(), 1_100);

        assert_eq!(t.poll(Timestamp::from_millis(1_150)), 1);
        assert_eq!(t.skipped(), 9);
    }

    #[test]
    fn test_poll_across_wrap_boundary() {
        let start = Timestamp::MAX.wrapping_sub(Timestamp::from_millis(49));
        let mut t = Ticker::new(start, Timestamp::from_millis(100), MissedTickPolicy::Burst)
            .unwrap();
        // Next fire lands past the boundary: MAX - 49 + 100 wraps to 50.
        assert_eq!(t.next_fire().as_millis(), 50);

        assert_eq!(t.poll(Timestamp::MAX), 0);
        assert_eq!(t.poll(Timestamp::from_millis(49)), 0);
        assert_eq!(t.poll(Timestamp::from_millis(250)), 3);
        assert_eq!(t.next_fire().as_millis(), 350);
    }

    #[test]
    fn test_reset_reanchors_schedule() {
        let mut t = ticker(100, MissedTickPolicy::Skip);
        t.poll(Timestamp::from_millis(1_000));
        assert_eq!(t.skipped(), 9);

        t.reset(Timestamp::from_millis(1_000));
        assert_eq!(t.skipped(), 0);
        assert_eq!(t.next_fire().as_millis(), 1_100);
        assert_eq!(t.poll(Timestamp::from_millis(1_050)), 0);
    }

    #[test]
    fn test_exact_multiple_gap() {
        let mut t = ticker(100, MissedTickPolicy::Burst);
        // now == next_fire + period: exactly two due.
        assert_eq!(t.poll(Timestamp::from_millis(200)), 2);
        assert_eq!(t.next_fire().as_millis(), 300);
    }
}
