//! Property-based tests for the overlap resolver using proptest.
//!
//! The sweep result is checked against a brute-force count over every minute
//! of a small time axis.

use chrono::{DateTime, Duration, TimeZone, Utc};
use meetup_engine::overlap::resolve;
use meetup_engine::types::Interval;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Intervals on a 0..120 minute axis, including zero-width and inverted ones.
fn arb_interval() -> impl Strategy<Value = Interval> {
    (0i64..120, -10i64..60).prop_map(|(start, len)| Interval {
        start: at(start),
        end: at(start + len),
    })
}

fn arb_intervals() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec(arb_interval(), 0..12)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// Number of intervals containing instant `t`.
fn coverage(intervals: &[Interval], t: DateTime<Utc>) -> usize {
    intervals.iter().filter(|i| i.contains(t)).count()
}

/// Maximum coverage over every whole minute of the axis.
fn brute_force_max(intervals: &[Interval]) -> usize {
    (-10i64..200)
        .map(|m| coverage(intervals, at(m)))
        .max()
        .unwrap_or(0)
}

/// The longest run of whole minutes at maximum coverage, earliest first on
/// equal length, as `(start, end)` minute offsets.
fn brute_force_window(intervals: &[Interval]) -> Option<(i64, i64)> {
    let max = brute_force_max(intervals);
    if max == 0 {
        return None;
    }

    let mut best: Option<(i64, i64)> = None;
    let mut run_start: Option<i64> = None;
    for m in -10i64..=200 {
        let at_max = m < 200 && coverage(intervals, at(m)) == max;
        match (at_max, run_start) {
            (true, None) => run_start = Some(m),
            (false, Some(start)) => {
                let longer = best.is_none_or(|(s, e)| m - start > e - s);
                if longer {
                    best = Some((start, m));
                }
                run_start = None;
            }
            _ => {}
        }
    }
    best
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 512,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    /// The reported count is the true maximum concurrency.
    #[test]
    fn count_matches_brute_force(intervals in arb_intervals()) {
        let expected = brute_force_max(&intervals);
        match resolve(&intervals) {
            Some(result) => prop_assert_eq!(result.participant_count, expected),
            None => prop_assert_eq!(expected, 0),
        }
    }

    /// Every instant of the chosen window has exactly the reported coverage.
    #[test]
    fn window_is_a_plateau_at_reported_count(intervals in arb_intervals()) {
        if let Some(result) = resolve(&intervals) {
            prop_assert!(result.window_start < result.window_end);
            let mut t = result.window_start;
            while t < result.window_end {
                prop_assert_eq!(coverage(&intervals, t), result.participant_count);
                t += Duration::minutes(1);
            }
        }
    }

    /// The window is the longest plateau at the maximum count, earliest on ties.
    #[test]
    fn window_is_longest_then_earliest_max_plateau(intervals in arb_intervals()) {
        let expected = brute_force_window(&intervals).map(|(s, e)| (at(s), at(e)));
        let actual = resolve(&intervals).map(|r| (r.window_start, r.window_end));
        prop_assert_eq!(actual, expected);
    }

    /// Not found exactly when there is no valid interval.
    #[test]
    fn not_found_iff_no_valid_interval(intervals in arb_intervals()) {
        let any_valid = intervals.iter().any(|i| i.is_valid());
        prop_assert_eq!(resolve(&intervals).is_some(), any_valid);
    }

    /// Input order never changes the result.
    #[test]
    fn result_is_order_independent(
        (original, shuffled) in arb_intervals()
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        prop_assert_eq!(resolve(&original), resolve(&shuffled));
    }
}
