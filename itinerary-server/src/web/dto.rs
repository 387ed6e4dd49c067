//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Leg, RouteSummary};

/// Query parameters for a route lookup.
///
/// All fields are optional here so that missing parameters reach
/// [`RouteQuery::from_params`](crate::planner::RouteQuery::from_params).
/// Repeated or undecodable parameters fail extraction; the handler turns
/// that rejection into the same error body.
#[derive(Debug, Default, Deserialize)]
pub struct RoutesRequest {
    /// Origin place name
    pub start: Option<String>,

    /// Destination place name
    pub stop: Option<String>,

    /// Latest arrival, `yyyymmddHHMMSS`
    pub time: Option<String>,
}

/// One itinerary in a route lookup response.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Departure from the first leg, `yyyymmddHHMMSS`
    pub start_time: Option<u64>,

    /// Arrival at the last leg, `yyyymmddHHMMSS`
    pub end_time: Option<u64>,

    /// Legs in travel order
    pub legs: Vec<LegResult>,
}

/// One leg of an itinerary.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// Upstream mode label, e.g. "BUS" or "WALK"
    pub mode: String,

    /// Boarding place name
    pub from: String,

    /// Alighting place name
    pub to: String,

    /// Line short name, or a sentinel for walks and unnamed trips
    pub route_name: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl RouteResult {
    /// Create from a domain route summary.
    pub fn from_summary(summary: &RouteSummary) -> Self {
        Self {
            start_time: summary.start_time,
            end_time: summary.end_time,
            legs: summary.legs.iter().map(LegResult::from_leg).collect(),
        }
    }
}

impl LegResult {
    /// Create from a domain leg.
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            mode: leg.mode.clone(),
            from: leg.from_name.clone(),
            to: leg.to_name.clone(),
            route_name: leg.route_name.to_string(),
        }
    }
}
