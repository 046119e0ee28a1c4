//! Clock sources and time-related operations over the millisecond timebase.
//!
//! This crate provides the stateful counterparts to the pure value type in
//! `millitick-core`:
//!
//! - **Clocks** ([`clock`]): the [`Clock`] seam, [`MonotonicClock`],
//!   [`ManualClock`]
//! - **Elapsed time** ([`stopwatch`]): [`Stopwatch`], [`Deadline`]
//! - **Schedules** ([`ticker`]): [`Ticker`] with [`MissedTickPolicy`]
//! - **Jitter** ([`jitter`]): [`JitterRecorder`]
//!
//! All stateful types take `now` explicitly; nothing reads a clock behind
//! the caller's back, so any [`Clock`] implementation (including the manual
//! one) drives them deterministically.
//!
//! # Example
//!
//! ```
//! use millitick_clock::{Clock, ManualClock, MissedTickPolicy, Ticker};
//! use millitick_core::Timestamp;
//!
//! let clock = ManualClock::new();
//! let mut ticker = Ticker::new(
//!     clock.now(),
//!     Timestamp::from_millis(100),
//!     MissedTickPolicy::Burst,
//! )
//! .unwrap();
//!
//! clock.advance(Timestamp::from_millis(250));
//! assert_eq!(ticker.poll(clock.now()), 2);
//! ```

pub mod clock;
pub mod jitter;
pub mod stopwatch;
pub mod ticker;

// Re-export main types for convenience
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use jitter::{JitterRecorder, JitterSnapshot};
pub use stopwatch::{Deadline, Stopwatch};
pub use ticker::{MissedTickPolicy, Ticker};
