//! Conversion from Digitransit plan DTOs to route summaries.
//!
//! Flattening never fails: absent containers become empty lists, absent
//! leg fields become sentinels, and unparseable times become `None`.

use crate::domain::{Leg, RouteName, RouteSummary, decode_timestamp};

use super::types::{LegDto, PlaceDto, PlanEdge, PlanResponse};

/// Mode reported for a leg the upstream gave no mode for.
pub const UNKNOWN_MODE: &str = "UNKNOWN";

/// Name reported for a leg endpoint the upstream gave no name for.
pub const UNKNOWN_PLACE: &str = "N/A";

/// Flatten a `planConnection` response into route summaries.
///
/// One summary per edge, in upstream order. A response missing `data`,
/// `planConnection` or `edges` yields an empty list. GraphQL errors are
/// not inspected here.
pub fn format_routes(response: &PlanResponse) -> Vec<RouteSummary> {
    let edges = response
        .data
        .as_ref()
        .and_then(|data| data.plan_connection.as_ref())
        .and_then(|connection| connection.edges.as_deref())
        .unwrap_or(&[]);

    edges.iter().map(convert_edge).collect()
}

/// Convert one edge. A missing node gives a summary with no times or legs.
fn convert_edge(edge: &PlanEdge) -> RouteSummary {
    let Some(node) = edge.node.as_ref() else {
        return RouteSummary {
            start_time: None,
            end_time: None,
            legs: Vec::new(),
        };
    };

    RouteSummary {
        start_time: decode_timestamp(node.start.as_deref()),
        end_time: decode_timestamp(node.end.as_deref()),
        legs: node
            .legs
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(convert_leg)
            .collect(),
    }
}

/// Convert one leg, substituting sentinels for missing fields.
fn convert_leg(leg: &LegDto) -> Leg {
    Leg {
        mode: leg
            .mode
            .clone()
            .unwrap_or_else(|| UNKNOWN_MODE.to_string()),
        from_name: place_name(leg.from.as_ref()),
        to_name: place_name(leg.to.as_ref()),
        route_name: RouteName::from_trip(
            leg.trip
                .as_ref()
                .map(|trip| trip.route_short_name.as_deref()),
        ),
    }
}

fn place_name(place: Option<&PlaceDto>) -> String {
    place
        .and_then(|p| p.name.clone())
        .unwrap_or_else(|| UNKNOWN_PLACE.to_string())
}
