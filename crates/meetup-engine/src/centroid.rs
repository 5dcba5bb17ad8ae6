//! Fair meeting point as the arithmetic mean of participant coordinates.
//!
//! Latitude and longitude are averaged independently on a flat plane. That is
//! accurate enough across a metropolitan area (tens of kilometres) and wrong at
//! continental scale or across the antimeridian; no curvature correction is
//! applied.

use tracing::debug;

use crate::types::Coordinate;

/// Component-wise mean of `points`, or `None` when `points` is empty.
pub fn centroid(points: &[Coordinate]) -> Option<Coordinate> {
    if points.is_empty() {
        debug!("no coordinates to average");
        return None;
    }

    let n = points.len() as f64;
    let (lat_sum, lng_sum) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));

    Some(Coordinate {
        lat: lat_sum / n,
        lng: lng_sum / n,
    })
}

/// Centroid over participants whose location may be unresolved.
///
/// `None` entries are skipped; if every entry is `None` the result is `None`.
pub fn centroid_of_known<I>(points: I) -> Option<Coordinate>
where
    I: IntoIterator<Item = Option<Coordinate>>,
{
    let known: Vec<Coordinate> = points.into_iter().flatten().collect();
    centroid(&known)
}
