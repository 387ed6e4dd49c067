//! Digitransit journey-planning API client.
//!
//! Digitransit exposes a single GraphQL endpoint per region. This module
//! provides the two queries the itinerary server needs:
//! - `stations(name:)` to turn a place name into coordinates
//! - `planConnection` to get itineraries between two coordinates
//!
//! Plan responses are flattened into domain route summaries by `convert`.

mod client;
mod convert;
mod error;
mod mock;
mod query;
mod types;

pub use client::{DigitransitClient, DigitransitConfig};
pub use convert::{UNKNOWN_MODE, UNKNOWN_PLACE, format_routes};
pub use error::DigitransitError;
pub use mock::MockTransitClient;
pub use query::{DEFAULT_TRANSIT_MODES, GraphQlRequest, PlanRequest, TransitMode};
pub use types::{
    GraphQlError, GraphQlResponse, LegDto, PlaceDto, PlanConnection, PlanData, PlanEdge, PlanNode,
    PlanResponse, StationDto, StationsData, StationsResponse, TripDto,
};
