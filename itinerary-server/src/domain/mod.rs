//! Domain types for the itinerary server.
//!
//! This module contains the request-independent model: coordinates,
//! route summaries and the pure conversions (place names, timestamps)
//! that sit between callers and the upstream planner.

mod coordinate;
mod location;
mod route;
mod time;

pub use coordinate::Coordinate;
pub use location::normalize_location;
pub use route::{Leg, NO_TRIP, RouteName, RouteSummary, UNNAMED_TRIP};
pub use time::{DEFAULT_UTC_OFFSET_HOURS, TimeError, decode_timestamp, encode_timestamp};
