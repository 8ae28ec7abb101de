//! Property-based tests for the time → angle mapping.

use chrono::NaiveTime;
use watch_core::{hour_angle, minute_angle, second_angle, Angle, Hand, Vec2};

fn time(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap_or(NaiveTime::MIN)
}

proptest::proptest! {
    /// Second hand moves in whole 6° steps and never reaches 360°.
    #[test]
    fn second_angle_is_six_degrees_per_second(h in 0u32..24, m in 0u32..60, s in 0u32..60) {
        let angle = second_angle(time(h, m, s)).degrees();
        assert_eq!(angle, s as f32 * 6.0);
        assert!((0.0..=354.0).contains(&angle));
    }

    /// Minute hand includes the 0.1°-per-second sweep.
    #[test]
    fn minute_angle_formula(h in 0u32..24, m in 0u32..60, s in 0u32..60) {
        let angle = minute_angle(time(h, m, s)).degrees();
        let expected = m as f32 * 6.0 + s as f32 * 0.1;
        assert!((angle - expected).abs() < 1e-3, "{} vs {}", angle, expected);
        assert!(angle < 360.0);
    }

    /// Within one minute the minute hand never moves backwards.
    #[test]
    fn minute_angle_monotone_within_minute(h in 0u32..24, m in 0u32..60, a in 0u32..60, b in 0u32..60) {
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        assert!(minute_angle(time(h, m, early)) <= minute_angle(time(h, m, late)));
    }

    /// Hour hand: 30° per hour plus 0.5° per minute, 12-hour cycle.
    #[test]
    fn hour_angle_formula(h in 0u32..24, m in 0u32..60, s in 0u32..60) {
        let angle = hour_angle(time(h, m, s)).degrees();
        assert_eq!(angle, (h % 12) as f32 * 30.0 + m as f32 * 0.5);
        assert_eq!(hour_angle(time(h, m, s)), hour_angle(time((h + 12) % 24, m, s)));
    }

    /// Any finite input normalizes into [0, 360).
    #[test]
    fn angle_normalizes_into_range(deg in -1.0e6f32..1.0e6f32) {
        let angle = Angle::from_degrees(deg).degrees();
        assert!((0.0..360.0).contains(&angle), "{} -> {}", deg, angle);
    }

    /// A hand's tip is always `length` away from its pivot.
    #[test]
    fn hand_tip_is_length_from_pivot(deg in -720.0f32..720.0, length in 1.0f32..500.0) {
        let pivot = Vec2::new(3.0, -4.0);
        let mut hand = Hand::new(length, 2.0, watch_core::Color::new(0, 0, 0), pivot);
        hand.update(deg);
        let distance = pivot.distance(hand.tip());
        assert!((distance - length).abs() < length * 1e-4 + 1e-3);
    }
}

#[test]
fn minute_hand_wraps_at_the_hour() {
    assert!(minute_angle(time(9, 59, 59)).degrees() > 359.0);
    assert_eq!(minute_angle(time(10, 0, 0)), Angle::ZERO);
}

#[test]
fn example_times() {
    assert_eq!(second_angle(time(0, 0, 15)).degrees(), 90.0);
    assert_eq!(minute_angle(time(0, 30, 0)).degrees(), 180.0);
    assert_eq!(hour_angle(time(21, 0, 0)).degrees(), 270.0);
    assert_eq!(hour_angle(time(3, 30, 0)).degrees(), 105.0);
}
