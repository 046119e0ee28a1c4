//! Fixed-width millisecond timestamps.
//!
//! [`Timestamp`] is an unsigned 32-bit count of milliseconds since an
//! arbitrary origin (boot, or clock construction). The representation wraps
//! after 2^32 ms - roughly 49.7 days - and every arithmetic operation here
//! wraps with it. There is no overflow detection; wrap is the contract.
//!
//! Unit constructors mirror the three human-readable units:
//! 1 second = 1000 units, 1 minute = 60 seconds, 1 hour = 60 minutes.
//! Integer inputs are taken as `u64` and reduced modulo 2^32 on narrowing;
//! fractional inputs follow Rust's float-to-integer cast rules (see the
//! `_f64` constructors).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TimeError;

/// Milliseconds in one second.
pub const MILLIS_PER_SECOND: u32 = 1_000;

/// Milliseconds in one minute.
pub const MILLIS_PER_MINUTE: u32 = 60 * MILLIS_PER_SECOND;

/// Milliseconds in one hour.
pub const MILLIS_PER_HOUR: u32 = 60 * MILLIS_PER_MINUTE;

/// An unsigned 32-bit count of milliseconds.
///
/// Used both for instants (milliseconds since an origin) and for spans
/// between instants; the representation does not distinguish the two.
///
/// The derived comparison operators order timestamps numerically, exactly
/// as the underlying `u32` does. For instants that may straddle the 2^32
/// wrap boundary use [`Timestamp::is_after`] / [`Timestamp::is_before`],
/// which compare within a half-range window instead.
///
/// # Example
///
/// ```
/// use millitick_core::Timestamp;
///
/// let t = Timestamp::from_secs(2);
/// assert_eq!(t.as_millis(), 2_000);
/// assert_eq!(Timestamp::from_mins(1), Timestamp::from_secs(60));
/// assert_eq!(Timestamp::from_hours(1), Timestamp::from_mins(60));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Timestamp(u32);

impl Timestamp {
    /// The zero timestamp.
    pub const ZERO: Self = Self(0);

    /// The largest representable timestamp, 2^32 - 1 ms.
    pub const MAX: Self = Self(u32::MAX);

    /// Create a timestamp from a raw millisecond count.
    #[must_use]
    pub const fn from_millis(millis: u32) -> Self {
        Self(millis)
    }

    /// Get the raw millisecond count.
    #[must_use]
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Convert whole seconds to a timestamp.
    ///
    /// The multiplication is performed in 64-bit arithmetic and the result
    /// is reduced modulo 2^32; large inputs wrap silently.
    ///
    /// # Example
    ///
    /// ```
    /// use millitick_core::Timestamp;
    ///
    /// assert_eq!(Timestamp::from_secs(1).as_millis(), 1_000);
    /// // 536_870_912_000 ms is an exact multiple of 2^32 ms.
    /// assert_eq!(Timestamp::from_secs(536_870_912), Timestamp::ZERO);
    /// ```
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.wrapping_mul(MILLIS_PER_SECOND as u64) as u32)
    }

    /// Convert whole minutes to a timestamp, reduced modulo 2^32.
    #[must_use]
    pub const fn from_mins(mins: u64) -> Self {
        Self(mins.wrapping_mul(MILLIS_PER_MINUTE as u64) as u32)
    }

    /// Convert whole hours to a timestamp, reduced modulo 2^32.
    ///
    /// # Example
    ///
    /// ```
    /// use millitick_core::Timestamp;
    ///
    /// assert_eq!(Timestamp::from_hours(1).as_millis(), 3_600_000);
    /// // 1194 h exceeds the 32-bit range and wraps.
    /// assert_eq!(Timestamp::from_hours(1194).as_millis(), 3_432_704);
    /// ```
    #[must_use]
    pub const fn from_hours(hours: u64) -> Self {
        Self(hours.wrapping_mul(MILLIS_PER_HOUR as u64) as u32)
    }

    /// Convert fractional seconds to a timestamp.
    ///
    /// Follows Rust's float-to-integer cast rules: the millisecond value is
    /// truncated toward zero, out-of-range values saturate at `0` and
    /// [`Timestamp::MAX`], and NaN maps to `0`.
    ///
    /// # Example
    ///
    /// ```
    /// use millitick_core::Timestamp;
    ///
    /// assert_eq!(Timestamp::from_secs_f64(1.5).as_millis(), 1_500);
    /// assert_eq!(Timestamp::from_secs_f64(0.0015).as_millis(), 1);
    /// assert_eq!(Timestamp::from_secs_f64(-2.0), Timestamp::ZERO);
    /// ```
    #[must_use]
    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs * f64::from(MILLIS_PER_SECOND)) as u32)
    }

    /// Convert fractional minutes to a timestamp.
    ///
    /// Same truncation and saturation rules as [`Timestamp::from_secs_f64`].
    #[must_use]
    pub fn from_mins_f64(mins: f64) -> Self {
        Self((mins * f64::from(MILLIS_PER_MINUTE)) as u32)
    }

    /// Convert fractional hours to a timestamp.
    ///
    /// Same truncation and saturation rules as [`Timestamp::from_secs_f64`].
    #[must_use]
    pub fn from_hours_f64(hours: f64) -> Self {
        Self((hours * f64::from(MILLIS_PER_HOUR)) as u32)
    }

    /// Add a span, wrapping at 2^32 ms.
    ///
    /// ```
    /// use millitick_core::Timestamp;
    ///
    /// let one = Timestamp::from_millis(1);
    /// assert_eq!(Timestamp::MAX.wrapping_add(one), Timestamp::ZERO);
    /// ```
    #[must_use]
    pub const fn wrapping_add(self, span: Timestamp) -> Self {
        Self(self.0.wrapping_add(span.0))
    }

    /// Subtract a span, wrapping at 2^32 ms.
    #[must_use]
    pub const fn wrapping_sub(self, span: Timestamp) -> Self {
        Self(self.0.wrapping_sub(span.0))
    }

    /// Milliseconds elapsed since `earlier`, modulo 2^32.
    ///
    /// Correct across the wrap boundary as long as the real elapsed time is
    /// below 2^32 ms.
    ///
    /// ```
    /// use millitick_core::Timestamp;
    ///
    /// let before_wrap = Timestamp::MAX.wrapping_sub(Timestamp::from_millis(4));
    /// let after_wrap = Timestamp::from_millis(5);
    /// assert_eq!(after_wrap.wrapping_since(before_wrap).as_millis(), 10);
    /// ```
    #[must_use]
    pub const fn wrapping_since(self, earlier: Timestamp) -> Timestamp {
        Self(self.0.wrapping_sub(earlier.0))
    }

    /// Wrap-aware ordering: is `self` later than `other`?
    ///
    /// Compares within a half-range window: the result is meaningful when
    /// the two instants are less than 2^31 ms (about 24.8 days) apart.
    /// Equal timestamps are neither after nor before each other.
    ///
    /// ```
    /// use millitick_core::Timestamp;
    ///
    /// // One tick past the wrap boundary is still "later".
    /// assert!(Timestamp::ZERO.is_after(Timestamp::MAX));
    /// assert!(!Timestamp::MAX.is_after(Timestamp::ZERO));
    /// ```
    #[must_use]
    pub const fn is_after(self, other: Timestamp) -> bool {
        (self.0.wrapping_sub(other.0) as i32) > 0
    }

    /// Wrap-aware ordering: is `self` earlier than `other`?
    ///
    /// Same half-range window as [`Timestamp::is_after`].
    #[must_use]
    pub const fn is_before(self, other: Timestamp) -> bool {
        other.is_after(self)
    }
}

impl From<Timestamp> for Duration {
    fn from(timestamp: Timestamp) -> Self {
        Duration::from_millis(u64::from(timestamp.0))
    }
}

impl TryFrom<Duration> for Timestamp {
    type Error = TimeError;

    /// Checked conversion: durations beyond 2^32 - 1 ms are rejected, not
    /// truncated.
    fn try_from(duration: Duration) -> Result<Self, TimeError> {
        let millis = duration.as_millis();
        u32::try_from(millis)
            .map(Self)
            .map_err(|_| TimeError::OutOfRange { millis })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", humantime::format_duration(Duration::from(*self)))
    }
}

impl FromStr for Timestamp {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, TimeError> {
        crate::human::parse(s)
    }
}
