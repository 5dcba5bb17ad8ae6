//! Find the window where the most availability intervals overlap.
//!
//! Each valid interval contributes a `+1` event at its start and a `-1` event at
//! its end. Events are sorted by time and swept left to right; all events at one
//! timestamp are applied as a batch before the running count is inspected, so an
//! interval ending exactly when another begins is a hand-over, not a gap.
//!
//! Every maximal plateau (span of constant, positive count) is a candidate. The
//! winner has the highest count, then the longest duration, then the earliest
//! start. The result depends only on the multiset of input intervals, never on
//! their order.

use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::types::{Availability, Interval, OverlapResult};

/// A plateau of constant concurrency closed by the sweep.
#[derive(Debug, Clone, Copy)]
struct Plateau {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    count: usize,
}

impl Plateau {
    /// Ranking used to pick the winning plateau: higher count, then longer
    /// duration, then earlier start.
    fn cmp_rank(&self, other: &Plateau) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| (self.end - self.start).cmp(&(other.end - other.start)))
            .then_with(|| other.start.cmp(&self.start))
    }
}

/// Resolve the window with the maximum number of concurrently available intervals.
///
/// Intervals with `end <= start` are dropped and do not count. Returns `None`
/// when no valid interval remains (empty or all-degenerate input); no
/// placeholder window is ever fabricated.
///
/// Runs in O(n log n) for n intervals.
pub fn resolve(intervals: &[Interval]) -> Option<OverlapResult> {
    let valid: Vec<&Interval> = intervals.iter().filter(|i| i.is_valid()).collect();

    let dropped = intervals.len() - valid.len();
    if dropped > 0 {
        debug!(dropped, "discarded degenerate availability intervals");
    }
    if valid.is_empty() {
        debug!(total = intervals.len(), "no valid availability to resolve");
        return None;
    }

    let mut events: Vec<(DateTime<Utc>, i64)> = Vec::with_capacity(valid.len() * 2);
    for interval in &valid {
        events.push((interval.start, 1));
        events.push((interval.end, -1));
    }
    // Starts sort before ends at the same instant.
    events.sort_unstable_by_key(|&(at, delta)| (at, Reverse(delta)));

    let mut best: Option<Plateau> = None;
    let mut count: i64 = 0;
    let mut plateau_start = events[0].0;

    let mut idx = 0;
    while idx < events.len() {
        let at = events[idx].0;
        let mut next = count;
        while idx < events.len() && events[idx].0 == at {
            next += events[idx].1;
            idx += 1;
        }

        if next == count {
            // Hand-over: as many intervals opened as closed here.
            continue;
        }

        if count > 0 {
            let candidate = Plateau {
                start: plateau_start,
                end: at,
                count: count as usize,
            };
            trace!(
                start = %candidate.start,
                end = %candidate.end,
                count = candidate.count,
                "closed plateau"
            );
            best = match best {
                Some(current) if current.cmp_rank(&candidate) != Ordering::Less => Some(current),
                _ => Some(candidate),
            };
        }

        count = next;
        plateau_start = at;
    }

    best.map(|p| OverlapResult {
        window_start: p.start,
        window_end: p.end,
        participant_count: p.count,
        duration_minutes: (p.end - p.start).num_minutes(),
    })
}

/// Resolve over an availability set, counting interval overlaps.
///
/// A participant who submitted two overlapping intervals is counted twice
/// inside the overlap. Use [`resolve_distinct`] to count people instead.
pub fn resolve_availability(availability: &[Availability]) -> Option<OverlapResult> {
    let intervals: Vec<Interval> = availability.iter().map(|a| a.interval).collect();
    resolve(&intervals)
}

/// Resolve over an availability set, counting each participant at most once.
///
/// Every participant's intervals are merged first, so the resulting
/// `participant_count` is the number of distinct participants free throughout
/// the window.
pub fn resolve_distinct(availability: &[Availability]) -> Option<OverlapResult> {
    let mut by_participant: HashMap<&str, Vec<Interval>> = HashMap::new();
    for entry in availability {
        by_participant
            .entry(entry.participant_id.as_str())
            .or_default()
            .push(entry.interval);
    }

    let merged: Vec<Interval> = by_participant
        .values()
        .flat_map(|intervals| merge_intervals(intervals))
        .collect();

    resolve(&merged)
}

/// Merge overlapping or touching intervals into a sorted, disjoint list.
///
/// Degenerate intervals are discarded.
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals.iter().filter(|i| i.is_valid()).copied().collect();

    if sorted.is_empty() {
        return Vec::new();
    }

    // Sort by start time (then by end time for stability).
    sorted.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}
