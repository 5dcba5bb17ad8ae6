//! # meetup-engine
//!
//! Deterministic availability and meeting-point resolution for group planning.
//!
//! Given every participant's free-time intervals and rough location, the engine
//! answers two questions: when are the most people free at once, and where is a
//! fair place to meet. All functions are pure; callers supply the data and get
//! plain value objects back.
//!
//! ## Modules
//!
//! - [`overlap`] — Sweep-line search for the window with the most concurrent availability
//! - [`centroid`] — Arithmetic-mean meeting point from participant coordinates
//! - [`location`] — Nearest-label classification and ranked catalog search
//! - [`planner`] — Combines the above into a suggestion, applying caller fallback policy
//! - [`types`] — Shared value types
//! - [`error`] — Error types

pub mod centroid;
pub mod error;
pub mod location;
pub mod overlap;
pub mod planner;
pub mod types;

pub use centroid::{centroid, centroid_of_known};
pub use error::EngineError;
pub use location::{lookup, nearest, search, Catalog, FALLBACK_LABEL, SEARCH_LIMIT};
pub use overlap::{resolve, resolve_availability, resolve_distinct};
pub use planner::{plan, PlanOptions, Suggestion};
pub use types::{Availability, Coordinate, Interval, NamedPoint, OverlapResult};
