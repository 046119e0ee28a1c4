//! Clock sources for the millisecond timebase.
//!
//! [`Clock`] is the seam between time-consuming logic and the source of
//! time. Production code reads [`MonotonicClock`]; tests drive
//! [`ManualClock`] to make time deterministic.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use millitick_core::Timestamp;

/// Source of the current timestamp.
pub trait Clock: Send + Sync {
    /// The current instant on this clock's timebase.
    fn now(&self) -> Timestamp;
}

/// Monotonic clock anchored at construction.
///
/// `now()` is the number of milliseconds elapsed since the clock was
/// created, truncated to 32 bits; the reading wraps after 2^32 ms
/// (about 49.7 days), which is exactly the timebase contract.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose zero instant is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        // Truncation to u32 is the wrap.
        Timestamp::from_millis(self.origin.elapsed().as_millis() as u32)
    }
}

/// Manually driven clock for deterministic tests.
///
/// Time only moves when [`ManualClock::advance`] or [`ManualClock::set`] is
/// called. The current instant is a single atomic word, so a manual clock
/// can be shared across threads.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU32,
}

impl ManualClock {
    /// Create a manual clock starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manual clock starting at `at`.
    #[must_use]
    pub fn starting_at(at: Timestamp) -> Self {
        Self {
            now_ms: AtomicU32::new(at.as_millis()),
        }
    }

    /// Move time forward by `span`, wrapping at 2^32 ms.
    pub fn advance(&self, span: Timestamp) {
        self.now_ms.fetch_add(span.as_millis(), Ordering::AcqRel);
    }

    /// Jump to an absolute instant.
    pub fn set(&self, at: Timestamp) {
        self.now_ms.store(at.as_millis(), Ordering::Release);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.now_ms.load(Ordering::Acquire))
    }
}
