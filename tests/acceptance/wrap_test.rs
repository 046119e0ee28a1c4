//! Conversion-identity and wraparound acceptance tests.
//!
//! Exercises the conversion surface end to end: named constructors, suffix
//! methods, human-readable parsing, and the modulo-2^32 contract.

use millitick_core::{human, Timestamp, UnitSuffix};

#[test]
fn test_unit_identities() {
    assert_eq!(Timestamp::from_secs(1).as_millis(), 1_000);
    assert_eq!(Timestamp::from_mins(1).as_millis(), 60_000);
    assert_eq!(Timestamp::from_hours(1).as_millis(), 3_600_000);

    // n hours == 60n minutes == 3600n seconds, modulo 2^32, including
    // values past the wrap boundary.
    for n in [0u64, 1, 24, 1_193, 1_194, 50_000, 123_456_789] {
        assert_eq!(Timestamp::from_hours(n), Timestamp::from_mins(60 * n));
        assert_eq!(Timestamp::from_hours(n), Timestamp::from_secs(3_600 * n));
    }
}

#[test]
fn test_conversions_wrap_modulo_two_pow_32() {
    // 536_870_912_000 ms is exactly 125 * 2^32 ms.
    assert_eq!(Timestamp::from_secs(536_870_912), Timestamp::ZERO);
    // One more second lands at 1000 ms past the boundary.
    assert_eq!(Timestamp::from_secs(536_870_913).as_millis(), 1_000);
    // Stepping one past MAX wraps to zero.
    assert_eq!(
        Timestamp::MAX.wrapping_add(Timestamp::from_millis(1)),
        Timestamp::ZERO
    );
}

#[test]
fn test_fractional_inputs_truncate() {
    assert_eq!(Timestamp::from_secs_f64(1.5).as_millis(), 1_500);
    assert_eq!(Timestamp::from_secs_f64(0.0015).as_millis(), 1);

    // Suffix methods and constructors agree in both numeric domains.
    assert_eq!(1.5.seconds(), Timestamp::from_secs_f64(1.5));
    assert_eq!(90.minutes(), Timestamp::from_mins(90));
    assert_eq!(1.5.hours(), 90.minutes());
}

#[test]
fn test_parse_and_format_roundtrip() {
    for millis in [0u32, 1, 999, 1_500, 90_000, 5_400_000, 4_233_600_000] {
        let t = Timestamp::from_millis(millis);
        assert_eq!(
            human::parse(&human::format(t)).unwrap(),
            t,
            "roundtrip for {millis}ms"
        );
    }

    // Fractional strings parse to the same instants as fractional inputs.
    assert_eq!(human::parse("1.5h").unwrap(), 90.minutes());
    assert_eq!(human::parse("1h 30m").unwrap(), 1.5.hours());
}

#[test]
fn test_wrap_aware_ordering_across_boundary() {
    // Walk a sequence of instants straddling the boundary; each step is
    // later than the one before even though the raw values drop at wrap.
    let mut previous = Timestamp::MAX.wrapping_sub(Timestamp::from_secs(2));
    for _ in 0..10 {
        let next = previous.wrapping_add(Timestamp::from_millis(500));
        assert!(next.is_after(previous));
        assert!(previous.is_before(next));
        assert_eq!(next.wrapping_since(previous).as_millis(), 500);
        previous = next;
    }
}
