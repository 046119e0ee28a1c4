//! Jitter accounting for cyclic execution.
//!
//! [`JitterRecorder`] keeps a fixed ring buffer of signed millisecond
//! deviations between observed inter-tick elapsed times and the configured
//! period. Recording is allocation-free; percentile queries sort a copy of
//! the retained samples.

use millitick_core::Timestamp;
use serde::Serialize;

/// Deviation statistics for a fixed-period schedule.
#[derive(Debug)]
pub struct JitterRecorder {
    /// Configured period in milliseconds.
    period_ms: i64,
    /// Ring buffer of signed deviations (elapsed - period).
    deviations: Box<[i64]>,
    /// Current write position in the ring buffer.
    write_pos: usize,
    /// Number of retained samples (saturates at buffer size).
    sample_count: usize,
    /// Total ticks recorded.
    total_ticks: u64,
    /// Ticks that arrived later than the period.
    late_count: u64,
    /// Smallest observed deviation.
    min_dev: i64,
    /// Largest observed deviation.
    max_dev: i64,
    /// Sum of all deviations for mean calculation.
    sum_dev: i64,
}

impl JitterRecorder {
    /// Create a recorder retaining up to `capacity` samples (at least one).
    #[must_use]
    pub fn new(capacity: usize, period: Timestamp) -> Self {
        let size = capacity.max(1);
        Self {
            period_ms: i64::from(period.as_millis()),
            deviations: vec![0i64; size].into_boxed_slice(),
            write_pos: 0,
            sample_count: 0,
            total_ticks: 0,
            late_count: 0,
            min_dev: i64::MAX,
            max_dev: i64::MIN,
            sum_dev: 0,
        }
    }

    /// Record one observed inter-tick elapsed time.
    pub fn record(&mut self, elapsed: Timestamp) {
        let dev = i64::from(elapsed.as_millis()) - self.period_ms;

        self.deviations[self.write_pos] = dev;
        self.write_pos = (self.write_pos + 1) % self.deviations.len();
        self.sample_count = (self.sample_count + 1).min(self.deviations.len());

        self.total_ticks += 1;
        self.min_dev = self.min_dev.min(dev);
        self.max_dev = self.max_dev.max(dev);
        self.sum_dev += dev;
        if dev > 0 {
            self.late_count += 1;
        }
    }

    /// Total ticks recorded.
    #[must_use]
    pub const fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Ticks that arrived later than the period.
    #[must_use]
    pub const fn late_count(&self) -> u64 {
        self.late_count
    }

    /// Smallest observed deviation in milliseconds.
    #[must_use]
    pub fn min_deviation_ms(&self) -> Option<i64> {
        (self.total_ticks > 0).then_some(self.min_dev)
    }

    /// Largest observed deviation in milliseconds.
    #[must_use]
    pub fn max_deviation_ms(&self) -> Option<i64> {
        (self.total_ticks > 0).then_some(self.max_dev)
    }

    /// Mean deviation in milliseconds.
    #[must_use]
    pub fn mean_deviation_ms(&self) -> Option<i64> {
        if self.total_ticks > 0 {
            Some(self.sum_dev / i64::try_from(self.total_ticks).unwrap_or(i64::MAX))
        } else {
            None
        }
    }

    /// Compute a deviation percentile over the retained samples.
    ///
    /// Returns `None` if nothing has been recorded or `percentile` is
    /// outside `0.0..=100.0`.
    #[must_use]
    pub fn percentile(&self, percentile: f64) -> Option<i64> {
        if self.sample_count == 0 {
            return None;
        }
        if !(0.0..=100.0).contains(&percentile) || percentile.is_nan() {
            return None;
        }

        let mut sorted: Vec<i64> = self.deviations[..self.sample_count].to_vec();
        sorted.sort_unstable();

        let idx = ((percentile / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        Some(sorted[idx.min(sorted.len() - 1)])
    }

    /// Get an immutable snapshot of the current statistics.
    #[must_use]
    pub fn snapshot(&self) -> JitterSnapshot {
        JitterSnapshot {
            period_ms: self.period_ms,
            total_ticks: self.total_ticks,
            late_count: self.late_count,
            min_deviation_ms: self.min_deviation_ms(),
            max_deviation_ms: self.max_deviation_ms(),
            mean_deviation_ms: self.mean_deviation_ms(),
            sample_count: self.sample_count,
        }
    }

    /// Reset all statistics.
    pub fn reset(&mut self) {
        self.deviations.fill(0);
        self.write_pos = 0;
        self.sample_count = 0;
        self.total_ticks = 0;
        self.late_count = 0;
        self.min_dev = i64::MAX;
        self.max_dev = i64::MIN;
        self.sum_dev = 0;
    }
}

/// Immutable snapshot of jitter statistics for reporting.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct JitterSnapshot {
    /// Configured period in milliseconds.
    pub period_ms: i64,
    /// Total ticks recorded.
    pub total_ticks: u64,
    /// Ticks later than the period.
    pub late_count: u64,
    /// Smallest deviation in milliseconds.
    pub min_deviation_ms: Option<i64>,
    /// Largest deviation in milliseconds.
    pub max_deviation_ms: Option<i64>,
    /// Mean deviation in milliseconds.
    pub mean_deviation_ms: Option<i64>,
    /// Number of samples retained in the ring.
    pub sample_count: usize,
}

impl JitterSnapshot {
    /// Deviation span (max - min) in milliseconds.
    #[must_use]
    pub fn deviation_span_ms(&self) -> Option<i64> {
        match (self.min_deviation_ms, self.max_deviation_ms) {
            (Some(min), Some(max)) => Some(max - min),
            _ => None,
        }
    }
}
