//! Human-readable parsing and formatting for [`Timestamp`] values.
//!
//! The grammar is `humantime`'s ("90s", "1h 30m", "150ms"), extended with a
//! single fractional term ("1.5s", "0.5m") to cover the fractional unit
//! inputs the integer grammar cannot express. Parsed values are
//! range-checked against the 32-bit millisecond range.

use std::time::Duration;

use crate::error::{TimeError, TimeResult};
use crate::timestamp::{Timestamp, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};

/// Parse a human-readable duration into a [`Timestamp`].
///
/// # Errors
///
/// [`TimeError::Parse`] for unrecognized input, [`TimeError::OutOfRange`]
/// for values beyond 2^32 - 1 ms.
///
/// # Example
///
/// ```
/// use millitick_core::human;
///
/// assert_eq!(human::parse("1h 30m").unwrap().as_millis(), 5_400_000);
/// assert_eq!(human::parse("1.5s").unwrap().as_millis(), 1_500);
/// ```
pub fn parse(s: &str) -> TimeResult<Timestamp> {
    match humantime::parse_duration(s.trim()) {
        Ok(duration) => Timestamp::try_from(duration),
        Err(err) => parse_fractional(s).unwrap_or(Err(TimeError::Parse(err))),
    }
}

/// Format a [`Timestamp`] in humantime notation ("1h 30m").
#[must_use]
pub fn format(timestamp: Timestamp) -> String {
    humantime::format_duration(Duration::from(timestamp)).to_string()
}

/// Parse a single fractional term such as "1.5s" or "0.5m".
///
/// Returns `None` when the input does not look like a fractional term, so
/// the caller can report the original grammar error instead.
fn parse_fractional(s: &str) -> Option<TimeResult<Timestamp>> {
    let s = s.trim();
    let unit_start = s.find(|c: char| c.is_ascii_alphabetic())?;
    let (number, unit) = s.split_at(unit_start);
    let number = number.trim();
    if !number.contains('.') {
        return None;
    }

    let value: f64 = number.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let factor = match unit {
        "ms" | "millis" => 1.0,
        "s" | "sec" | "secs" | "seconds" => f64::from(MILLIS_PER_SECOND),
        "m" | "min" | "mins" | "minutes" => f64::from(MILLIS_PER_MINUTE),
        "h" | "hr" | "hours" => f64::from(MILLIS_PER_HOUR),
        _ => return None,
    };

    let millis = value * factor;
    if millis > f64::from(u32::MAX) {
        return Some(Err(TimeError::OutOfRange {
            millis: millis as u128,
        }));
    }

    // Truncation toward zero, matching the fractional unit constructors.
    Some(Ok(Timestamp::from_millis(millis as u32)))
}

/// Serde helper for [`Timestamp`] fields stored as humantime strings.
///
/// ```
/// use millitick_core::Timestamp;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Config {
///     #[serde(with = "millitick_core::serde_human")]
///     period: Timestamp,
/// }
/// ```
pub mod serde_human {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::timestamp::Timestamp;

    /// Serialize a timestamp as a humantime string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(timestamp: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format(*timestamp))
    }

    /// Deserialize a timestamp from a humantime string.
    ///
    /// # Errors
    ///
    /// Fails on unparseable or out-of-range values.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse(&s).map_err(serde::de::Error::custom)
    }
}
