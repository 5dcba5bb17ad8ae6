//! Nearest-label classification and ranked search over a location catalog.
//!
//! The catalog is reference data supplied by the caller (see [`Catalog`]); the
//! engine holds no built-in tables. Distances are planar in degrees, consistent
//! with [`crate::centroid`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::types::{Coordinate, NamedPoint};

/// Label returned by [`nearest`] when the catalog is empty.
pub const FALLBACK_LABEL: &str = "City Center";

/// Default cap on [`search`] results.
pub const SEARCH_LIMIT: usize = 10;

/// Label of the catalog entry closest to `point`.
///
/// Ties resolve to the first entry in catalog order. Returns [`FALLBACK_LABEL`]
/// for an empty catalog or a non-finite `point`.
pub fn nearest<'a>(point: Coordinate, catalog: &'a [NamedPoint]) -> &'a str {
    if !point.lat.is_finite() || !point.lng.is_finite() {
        debug!(lat = point.lat, lng = point.lng, "non-finite point, using fallback label");
        return FALLBACK_LABEL;
    }

    let mut best: Option<(&NamedPoint, f64)> = None;

    for entry in catalog {
        let distance = point.planar_distance(&entry.coordinate);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((entry, distance)),
        }
    }

    match best {
        Some((entry, _)) => &entry.label,
        None => {
            debug!("empty catalog, using fallback label");
            FALLBACK_LABEL
        }
    }
}

/// Case-insensitive substring search, capped at [`SEARCH_LIMIT`] results.
///
/// See [`search_with_limit`].
pub fn search<'a>(
    query: &str,
    catalog: &'a [NamedPoint],
    city_filter: Option<&str>,
) -> Vec<&'a NamedPoint> {
    search_with_limit(query, catalog, city_filter, SEARCH_LIMIT)
}

/// Case-insensitive substring search with an explicit result cap.
///
/// Entries whose label contains `query` (and whose city contains `city_filter`,
/// if given) match. Labels starting with the query come before labels that only
/// contain it; each group keeps catalog order. An empty query matches nothing.
pub fn search_with_limit<'a>(
    query: &str,
    catalog: &'a [NamedPoint],
    city_filter: Option<&str>,
    limit: usize,
) -> Vec<&'a NamedPoint> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let city = city_filter
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());

    let mut prefixed = Vec::new();
    let mut contained = Vec::new();

    for entry in catalog {
        if let Some(city) = &city {
            if !entry.city.to_lowercase().contains(city.as_str()) {
                continue;
            }
        }
        let label = entry.label.to_lowercase();
        if label.starts_with(&query) {
            prefixed.push(entry);
        } else if label.contains(&query) {
            contained.push(entry);
        }
    }

    prefixed.extend(contained);
    prefixed.truncate(limit);
    prefixed
}

/// Resolve a free-text place name to a catalog entry.
///
/// An exact case-insensitive label match wins; otherwise the first entry whose
/// label contains the name, or is contained in it, is returned. Returns `None`
/// when nothing matches so the caller can pick its own default.
pub fn lookup<'a>(name: &str, catalog: &'a [NamedPoint]) -> Option<&'a NamedPoint> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }

    catalog
        .iter()
        .find(|entry| entry.label.to_lowercase() == name)
        .or_else(|| {
            catalog.iter().find(|entry| {
                let label = entry.label.to_lowercase();
                label.contains(&name) || name.contains(&label)
            })
        })
}

/// An owned, swappable set of named locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<NamedPoint>,
}

impl Catalog {
    pub fn new(entries: Vec<NamedPoint>) -> Self {
        Self { entries }
    }

    /// Parse a JSON array of `{city, label, lat, lng}` records.
    ///
    /// `area_name` is accepted as an alias for `label`.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidCatalog` if the JSON is malformed or an
    /// entry has a non-finite coordinate.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<NamedPoint> =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidCatalog(e.to_string()))?;

        if let Some(bad) = entries
            .iter()
            .find(|e| !e.coordinate.lat.is_finite() || !e.coordinate.lng.is_finite())
        {
            return Err(EngineError::InvalidCatalog(format!(
                "non-finite coordinate for '{}'",
                bad.label
            )));
        }

        debug!(entries = entries.len(), "loaded location catalog");
        Ok(Self { entries })
    }

    /// Entries whose city matches `city` case-insensitively.
    pub fn for_city(&self, city: &str) -> Catalog {
        let city = city.trim().to_lowercase();
        Catalog {
            entries: self
                .entries
                .iter()
                .filter(|e| e.city.to_lowercase() == city)
                .cloned()
                .collect(),
        }
    }

    pub fn entries(&self) -> &[NamedPoint] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn nearest(&self, point: Coordinate) -> &str {
        nearest(point, &self.entries)
    }

    pub fn search(&self, query: &str, city_filter: Option<&str>) -> Vec<&NamedPoint> {
        search(query, &self.entries, city_filter)
    }

    pub fn lookup(&self, name: &str) -> Option<&NamedPoint> {
        lookup(name, &self.entries)
    }
}
