//! Value types shared by the resolvers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A half-open availability interval `[start, end)` on a single UTC time axis.
///
/// Fields are public so callers can build intervals from stored records without
/// validation; the resolvers skip any interval whose `end <= start`. Use
/// [`Interval::try_new`] when a bad record should be rejected instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, rejecting zero-width and inverted ranges.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInterval` if `end <= start`.
    pub fn try_new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(EngineError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Whether the interval has positive width.
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether instant `t` lies inside `[start, end)`.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }
}

/// One entry of an event's availability set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub participant_id: String,
    #[serde(flatten)]
    pub interval: Interval,
}

impl Availability {
    pub fn new(participant_id: impl Into<String>, interval: Interval) -> Self {
        Self {
            participant_id: participant_id.into(),
            interval,
        }
    }
}

/// A position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Flat-plane distance in degrees. Only meaningful at city scale.
    pub fn planar_distance(&self, other: &Coordinate) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lng = self.lng - other.lng;
        (d_lat * d_lat + d_lng * d_lng).sqrt()
    }
}

/// A named reference location, e.g. a neighborhood of a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPoint {
    #[serde(alias = "area_name")]
    pub label: String,
    pub city: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
}

impl NamedPoint {
    pub fn new(label: impl Into<String>, city: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            label: label.into(),
            city: city.into(),
            coordinate: Coordinate::new(lat, lng),
        }
    }
}

/// The window where the most availability intervals overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapResult {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    /// Number of intervals covering every instant of the window.
    pub participant_count: usize,
    pub duration_minutes: i64,
}
