//! Route lookup: place names in, route summaries out.
//!
//! A lookup is a straight pipeline with no retries:
//! 1. normalize and resolve both place names to coordinates
//! 2. encode the latest-arrival time
//! 3. request a plan restricted to the configured modes
//! 4. flatten the plan into route summaries
//!
//! Any failure aborts the whole lookup; there are no partial results.

use std::future::Future;

use tracing::debug;

use crate::digitransit::{DigitransitError, PlanRequest, PlanResponse, StationDto, format_routes};
use crate::domain::{Coordinate, RouteSummary, TimeError, encode_timestamp, normalize_location};

use super::config::LookupConfig;

/// Message returned when a required request parameter is missing.
pub const MISSING_PARAMETERS: &str = "Missing required parameters";

/// Error from a route lookup.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Required input missing or malformed
    #[error("{0}")]
    InvalidRequest(String),

    /// No station matched a place name
    #[error("location not found: {location}")]
    NotFound { location: String },

    /// Upstream request failed
    #[error(transparent)]
    Upstream(#[from] DigitransitError),

    /// Latest-arrival time could not be encoded
    #[error(transparent)]
    Format(#[from] TimeError),
}

/// Upstream station directory and trip planner.
///
/// This abstraction allows lookups to run against mock data.
pub trait TransitApi {
    /// Stations whose name exactly matches `name`, best match first.
    fn find_stations(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<StationDto>, DigitransitError>> + Send;

    /// Itineraries for a plan request.
    fn plan_connection(
        &self,
        request: &PlanRequest,
    ) -> impl Future<Output = Result<PlanResponse, DigitransitError>> + Send;
}

/// A validated route query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    /// Origin place name, as typed by the caller.
    pub origin: String,

    /// Destination place name, as typed by the caller.
    pub destination: String,

    /// Latest acceptable arrival, `yyyymmddHHMMSS`.
    pub latest_arrival: u64,
}

impl RouteQuery {
    /// Create a new route query.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        latest_arrival: u64,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            latest_arrival,
        }
    }

    /// Build a query from raw request parameters.
    ///
    /// Every parameter must be present and non-empty, and `time` must be
    /// an unsigned integer.
    pub fn from_params(
        start: Option<&str>,
        stop: Option<&str>,
        time: Option<&str>,
    ) -> Result<Self, LookupError> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.filter(|v| !v.is_empty())
        }

        let (Some(start), Some(stop), Some(time)) = (present(start), present(stop), present(time))
        else {
            return Err(LookupError::InvalidRequest(MISSING_PARAMETERS.to_string()));
        };

        let latest_arrival = time
            .trim()
            .parse::<u64>()
            .map_err(|_| LookupError::InvalidRequest(format!("Invalid time: {time}")))?;

        Ok(Self::new(start, stop, latest_arrival))
    }
}

/// Resolves place names and fetches routes through a [`TransitApi`].
#[derive(Debug)]
pub struct RouteLookup<C> {
    client: C,
    config: LookupConfig,
}

impl<C: TransitApi> RouteLookup<C> {
    /// Create a new lookup over the given upstream.
    pub fn new(client: C, config: LookupConfig) -> Self {
        Self { client, config }
    }

    /// Returns the upstream client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns the lookup configuration.
    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Resolve a place name to the coordinates of its first station match.
    ///
    /// Multiple matches are not disambiguated.
    pub async fn resolve_coordinates(&self, place: &str) -> Result<Coordinate, LookupError> {
        let name = normalize_location(place);
        let stations = self.client.find_stations(&name).await?;

        let station = stations
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound {
                location: place.to_string(),
            })?;

        debug!(
            location = %name,
            gtfs_id = %station.gtfs_id,
            lat = station.lat,
            lon = station.lon,
            "resolved station coordinates"
        );

        Ok(Coordinate::new(station.lat, station.lon))
    }

    /// Fetch routes between two places arriving no later than the given time.
    ///
    /// Both places are resolved concurrently; the first failure wins.
    pub async fn get_routes(&self, query: &RouteQuery) -> Result<Vec<RouteSummary>, LookupError> {
        let (origin, destination) = futures::try_join!(
            self.resolve_coordinates(&query.origin),
            self.resolve_coordinates(&query.destination),
        )?;

        let latest_arrival = encode_timestamp(query.latest_arrival, self.config.utc_offset_hours)?;

        let request =
            PlanRequest::new(origin, destination, latest_arrival).with_modes(&self.config.modes);
        let response = self.client.plan_connection(&request).await?;

        let routes = format_routes(&response);
        debug!(routes = routes.len(), "formatted plan");

        Ok(routes)
    }
}
