//! GraphQL documents and request bodies.
//!
//! Place names and coordinates are passed as variables, never spliced into
//! the query text.

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::Coordinate;

/// Exact-name station lookup.
pub const STATIONS_QUERY: &str = "\
query Stations($name: String) {
  stations(name: $name) {
    gtfsId
    name
    lat
    lon
  }
}";

/// Itineraries between two coordinates, arriving no later than a given time.
pub const PLAN_CONNECTION_QUERY: &str = "\
query PlanConnection(
  $origin: PlanLabeledLocationInput!
  $destination: PlanLabeledLocationInput!
  $modes: PlanModesInput
  $dateTime: PlanDateTimeInput
) {
  planConnection(
    origin: $origin
    destination: $destination
    modes: $modes
    dateTime: $dateTime
  ) {
    edges {
      node {
        start
        end
        legs {
          mode
          from { name }
          to { name }
          trip { routeShortName }
        }
      }
    }
  }
}";

/// Transit modes the planner may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitMode {
    Bus,
    Rail,
    Tram,
    Ferry,
}

/// Mode filter applied to every plan request.
pub const DEFAULT_TRANSIT_MODES: [TransitMode; 4] = [
    TransitMode::Bus,
    TransitMode::Rail,
    TransitMode::Tram,
    TransitMode::Ferry,
];

/// Body of a GraphQL POST.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: Value,
}

impl GraphQlRequest {
    /// Station lookup for an already-normalized name.
    pub fn stations(name: &str) -> Self {
        Self {
            query: STATIONS_QUERY,
            variables: json!({ "name": name }),
        }
    }

    /// Plan query for the given request.
    pub fn plan_connection(request: &PlanRequest) -> Self {
        Self {
            query: PLAN_CONNECTION_QUERY,
            variables: request.variables(),
        }
    }
}

/// Parameters of one `planConnection` query.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,

    /// ISO-8601 latest arrival, e.g. "2025-09-09T14:30+03:00".
    pub latest_arrival: String,

    pub modes: Vec<TransitMode>,
}

impl PlanRequest {
    /// Create a request using [`DEFAULT_TRANSIT_MODES`].
    pub fn new(
        origin: Coordinate,
        destination: Coordinate,
        latest_arrival: impl Into<String>,
    ) -> Self {
        Self {
            origin,
            destination,
            latest_arrival: latest_arrival.into(),
            modes: DEFAULT_TRANSIT_MODES.to_vec(),
        }
    }

    /// Restrict the request to the given modes.
    pub fn with_modes(mut self, modes: &[TransitMode]) -> Self {
        self.modes = modes.to_vec();
        self
    }

    /// GraphQL variables for [`PLAN_CONNECTION_QUERY`].
    pub fn variables(&self) -> Value {
        let modes: Vec<Value> = self
            .modes
            .iter()
            .map(|mode| json!({ "mode": mode }))
            .collect();

        json!({
            "origin": location(&self.origin),
            "destination": location(&self.destination),
            "modes": { "transit": { "transit": modes } },
            "dateTime": { "latestArrival": self.latest_arrival },
        })
    }
}

fn location(coordinate: &Coordinate) -> Value {
    json!({
        "location": {
            "coordinate": {
                "latitude": coordinate.latitude,
                "longitude": coordinate.longitude,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stations_request_uses_variable() {
        let request = GraphQlRequest::stations("central-station");
        assert_eq!(request.query, STATIONS_QUERY);
        assert_eq!(request.variables, json!({ "name": "central-station" }));
    }

    #[test]
    fn quotes_in_names_stay_out_of_query_text() {
        let request = GraphQlRequest::stations("\"}){evil}");
        assert!(!request.query.contains("evil"));
        assert_eq!(request.variables["name"], "\"}){evil}");
    }

    #[test]
    fn plan_variables() {
        let request = PlanRequest::new(
            Coordinate::new(60.186, 24.828),
            Coordinate::new(60.18, 24.82),
            "2025-09-09T08:40+03:00",
        );

        assert_eq!(
            request.variables(),
            json!({
                "origin": {"location": {"coordinate": {"latitude": 60.186, "longitude": 24.828}}},
                "destination": {"location": {"coordinate": {"latitude": 60.18, "longitude": 24.82}}},
                "modes": {"transit": {"transit": [
                    {"mode": "BUS"}, {"mode": "RAIL"}, {"mode": "TRAM"}, {"mode": "FERRY"}
                ]}},
                "dateTime": {"latestArrival": "2025-09-09T08:40+03:00"}
            })
        );
    }

    #[test]
    fn with_modes_overrides_default() {
        let request = PlanRequest::new(
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 1.0),
            "2025-01-01T00:00+03:00",
        )
        .with_modes(&[TransitMode::Ferry]);

        assert_eq!(request.modes, vec![TransitMode::Ferry]);
        assert_eq!(
            request.variables()["modes"],
            json!({"transit": {"transit": [{"mode": "FERRY"}]}})
        );
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(GraphQlRequest::stations("Keilaniemi")).unwrap();
        assert!(body["query"].as_str().unwrap().contains("stations(name: $name)"));
        assert_eq!(body["variables"]["name"], "Keilaniemi");
    }
}
