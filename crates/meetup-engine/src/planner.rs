//! Combine overlap, centroid and nearest-label results into one suggestion.
//!
//! This is caller-side policy on top of the pure resolvers. In particular the
//! optional fallback window lives here, not in [`crate::overlap`], and any
//! fabricated window is tagged with [`TimeSource::Fallback`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::centroid::centroid_of_known;
use crate::location::nearest;
use crate::overlap::{resolve_availability, resolve_distinct};
use crate::types::{Availability, Coordinate, Interval, NamedPoint, OverlapResult};

/// A participant as seen by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    /// `None` when the participant's location could not be geocoded.
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub availability: Vec<Interval>,
}

/// How overlapping availability is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimePolicy {
    /// Count interval overlaps; a participant may count more than once.
    #[default]
    MaxOverlap,
    /// Merge each participant's intervals first; count distinct participants.
    MaxDistinct,
}

/// What to do when no overlap window exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FallbackPolicy {
    /// Report no suggested time.
    #[default]
    None,
    /// Suggest the first interval submitted, as-is, tagged as a fallback.
    ///
    /// The resolver only finds nothing when every interval is degenerate, so
    /// the fallback window may itself be zero-width or inverted.
    FirstInterval,
}

/// Options for [`plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanOptions {
    pub time_policy: TimePolicy,
    pub fallback: FallbackPolicy,
}

/// Where a suggested time came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSource {
    Overlap,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedTime {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub participant_count: usize,
    pub source: TimeSource,
}

impl From<OverlapResult> for SuggestedTime {
    fn from(r: OverlapResult) -> Self {
        Self {
            start: r.window_start,
            end: r.window_end,
            participant_count: r.participant_count,
            source: TimeSource::Overlap,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedLocation {
    pub lat: f64,
    pub lng: f64,
    pub neighborhood: String,
}

/// Time and place suggestion for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub suggested_time: Option<SuggestedTime>,
    pub suggested_location: Option<SuggestedLocation>,
    pub total_participants: usize,
}

/// Build a suggestion for one event.
///
/// Time and location are resolved independently. The location is absent when
/// no participant has a coordinate; the time is absent when no overlap exists
/// and `options.fallback` is [`FallbackPolicy::None`].
pub fn plan(
    participants: &[Participant],
    catalog: &[NamedPoint],
    options: PlanOptions,
) -> Suggestion {
    let availability: Vec<Availability> = participants
        .iter()
        .flat_map(|p| {
            p.availability
                .iter()
                .map(move |interval| Availability::new(p.id.clone(), *interval))
        })
        .collect();

    let overlap = match options.time_policy {
        TimePolicy::MaxOverlap => resolve_availability(&availability),
        TimePolicy::MaxDistinct => resolve_distinct(&availability),
    };

    let suggested_time = match (overlap, options.fallback) {
        (Some(result), _) => Some(SuggestedTime::from(result)),
        (None, FallbackPolicy::None) => None,
        (None, FallbackPolicy::FirstInterval) => {
            let first = availability.first();
            if first.is_some() {
                debug!("no overlap found, falling back to first interval");
            }
            first.map(|a| SuggestedTime {
                start: a.interval.start,
                end: a.interval.end,
                participant_count: 1,
                source: TimeSource::Fallback,
            })
        }
    };

    let suggested_location =
        centroid_of_known(participants.iter().map(|p| p.coordinate)).map(|c| SuggestedLocation {
            lat: c.lat,
            lng: c.lng,
            neighborhood: nearest(c, catalog).to_string(),
        });

    Suggestion {
        suggested_time,
        suggested_location,
        total_participants: participants.len(),
    }
}
