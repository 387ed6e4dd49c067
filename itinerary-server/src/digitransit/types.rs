//! Digitransit GraphQL response DTOs.
//!
//! These types mirror the selection sets of the queries in `query.rs`.
//! Nearly everything is `Option` because GraphQL nulls out fields freely
//! and a partial plan is still worth formatting.

use serde::Deserialize;

/// Envelope of every GraphQL response.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    /// Query result; null when the whole query failed.
    pub data: Option<T>,

    /// Errors reported alongside (or instead of) the data.
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

impl<T> GraphQlResponse<T> {
    /// Wrap data with no errors.
    pub fn from_data(data: T) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    /// A response carrying neither data nor errors.
    pub fn empty() -> Self {
        Self {
            data: None,
            errors: None,
        }
    }

    /// All error messages joined with "; ", if any were reported.
    pub fn error_message(&self) -> Option<String> {
        let errors = self.errors.as_deref().filter(|e| !e.is_empty())?;
        Some(
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// A single GraphQL error entry.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Response of the `stations(name:)` query.
pub type StationsResponse = GraphQlResponse<StationsData>;

/// Response of the `planConnection` query.
pub type PlanResponse = GraphQlResponse<PlanData>;

#[derive(Debug, Clone, Deserialize)]
pub struct StationsData {
    pub stations: Option<Vec<StationDto>>,
}

/// A station matched by name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    /// Feed-qualified id, e.g. "HSL:1000001".
    pub gtfs_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanData {
    pub plan_connection: Option<PlanConnection>,
}

/// Connection-style page of itineraries. Only the first page is read.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanConnection {
    pub edges: Option<Vec<PlanEdge>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanEdge {
    pub node: Option<PlanNode>,
}

/// One itinerary.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanNode {
    /// Departure, ISO-8601 with offset.
    pub start: Option<String>,

    /// Arrival, ISO-8601 with offset.
    pub end: Option<String>,

    pub legs: Option<Vec<LegDto>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegDto {
    /// Mode such as "WALK", "BUS", "METRO".
    pub mode: Option<String>,
    pub from: Option<PlaceDto>,
    pub to: Option<PlaceDto>,

    /// Null for legs that are not part of a scheduled trip.
    pub trip: Option<TripDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDto {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDto {
    pub route_short_name: Option<String>,
}
