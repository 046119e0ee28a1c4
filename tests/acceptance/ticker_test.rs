//! Clock-driven scheduling acceptance tests.
//!
//! Drives the stateful clock-crate types from a manual clock, including
//! runs that straddle the 2^32 ms wrap boundary. No test sleeps.

use millitick_clock::{Clock, Deadline, JitterRecorder, ManualClock, MissedTickPolicy, Stopwatch, Ticker};
use millitick_core::Timestamp;

#[test]
fn test_ticker_runs_across_wrap_boundary() {
    // Start two and a half periods before the boundary.
    let start = Timestamp::MAX.wrapping_sub(Timestamp::from_millis(249));
    let clock = ManualClock::starting_at(start);
    let mut ticker = Ticker::new(
        clock.now(),
        Timestamp::from_millis(100),
        MissedTickPolicy::Burst,
    )
    .unwrap();

    let mut fired = 0u32;
    for _ in 0..10 {
        clock.advance(Timestamp::from_millis(100));
        fired += ticker.poll(clock.now());
    }
    assert_eq!(fired, 10);
    assert_eq!(ticker.skipped(), 0);
}

#[test]
fn test_skip_policy_under_stall() {
    let clock = ManualClock::new();
    let mut ticker = Ticker::new(
        clock.now(),
        Timestamp::from_millis(10),
        MissedTickPolicy::Skip,
    )
    .unwrap();

    clock.advance(Timestamp::from_millis(10));
    assert_eq!(ticker.poll(clock.now()), 1);

    // A 100 ms stall swallows nine ticks.
    clock.advance(Timestamp::from_millis(100));
    assert_eq!(ticker.poll(clock.now()), 1);
    assert_eq!(ticker.skipped(), 9);

    // Back on schedule afterwards.
    clock.advance(Timestamp::from_millis(10));
    assert_eq!(ticker.poll(clock.now()), 1);
    assert_eq!(ticker.skipped(), 9);
}

#[test]
fn test_deadline_with_manual_clock_across_wrap() {
    let clock = ManualClock::starting_at(Timestamp::MAX.wrapping_sub(Timestamp::from_millis(9)));
    let deadline = Deadline::after(clock.now(), Timestamp::from_millis(30));

    assert!(!deadline.is_expired(clock.now()));
    assert_eq!(deadline.remaining(clock.now()).as_millis(), 30);

    // Step over the boundary; still pending.
    clock.advance(Timestamp::from_millis(20));
    assert!(!deadline.is_expired(clock.now()));
    assert_eq!(deadline.remaining(clock.now()).as_millis(), 10);

    clock.advance(Timestamp::from_millis(10));
    assert!(deadline.is_expired(clock.now()));
    assert_eq!(deadline.remaining(clock.now()), Timestamp::ZERO);
}

#[test]
fn test_stopwatch_feeds_jitter_recorder() {
    let clock = ManualClock::new();
    let period = Timestamp::from_millis(100);
    let mut stopwatch = Stopwatch::started_at(clock.now());
    let mut jitter = JitterRecorder::new(16, period);

    for gap in [100u32, 105, 95, 100] {
        clock.advance(Timestamp::from_millis(gap));
        let elapsed = stopwatch.lap(clock.now());
        jitter.record(elapsed);
    }

    let snap = jitter.snapshot();
    assert_eq!(snap.total_ticks, 4);
    assert_eq!(snap.late_count, 1);
    assert_eq!(snap.min_deviation_ms, Some(-5));
    assert_eq!(snap.max_deviation_ms, Some(5));
    assert_eq!(snap.mean_deviation_ms, Some(0));
    assert_eq!(snap.deviation_span_ms(), Some(10));
}

#[test]
fn test_long_run_keeps_phase() {
    // 10_000 exact periods of 500 s cross the wrap boundary once; the
    // schedule must fire exactly once per poll throughout.
    let clock = ManualClock::new();
    let period = Timestamp::from_secs(500);
    let mut ticker = Ticker::new(clock.now(), period, MissedTickPolicy::Burst).unwrap();

    for i in 1..=10_000u32 {
        clock.advance(period);
        assert_eq!(ticker.poll(clock.now()), 1, "poll {i}");
    }
    assert_eq!(ticker.skipped(), 0);
}
