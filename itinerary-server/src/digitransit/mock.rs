//! Mock Digitransit client for running without API access.
//!
//! Serves stations and a canned plan from memory, optionally loaded from a
//! JSON fixture file, and records every request it receives.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Deserialize;

use crate::domain::normalize_location;
use crate::planner::TransitApi;

use super::client::ensure_data;
use super::error::DigitransitError;
use super::query::PlanRequest;
use super::types::{PlanResponse, StationDto};

/// On-disk fixture layout.
///
/// ```json
/// {
///   "stations": { "Keilaniemi": [{"gtfsId": "HSL:1", "name": "Keilaniemi", "lat": 60.17, "lon": 24.82}] },
///   "plan": { "data": { "planConnection": { "edges": [] } } }
/// }
/// ```
#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    stations: HashMap<String, Vec<StationDto>>,
    plan: Option<PlanResponse>,
}

/// Requests seen by a [`MockTransitClient`].
#[derive(Debug, Default)]
struct Recorded {
    station_lookups: Vec<String>,
    plan_requests: Vec<PlanRequest>,
}

/// Mock upstream that answers from pre-loaded data.
///
/// Station names are matched after normalization, the same way the real
/// lookup normalizes them. Clones share the request log.
#[derive(Debug, Clone, Default)]
pub struct MockTransitClient {
    stations: HashMap<String, Vec<StationDto>>,
    plan: Option<PlanResponse>,
    failure: Option<(u16, String)>,
    recorded: Arc<Mutex<Recorded>>,
}

impl MockTransitClient {
    /// Create a mock with no stations and an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load stations and plan from a JSON fixture file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DigitransitError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| {
            DigitransitError::Fixture(format!("failed to read {}: {e}", path.display()))
        })?;

        let fixture: Fixture = serde_json::from_str(&json).map_err(|e| {
            DigitransitError::Fixture(format!("failed to parse {}: {e}", path.display()))
        })?;

        let mut client = Self::new();
        for (name, stations) in fixture.stations {
            client.stations.insert(normalize_location(&name), stations);
        }
        client.plan = fixture.plan;

        Ok(client)
    }

    /// Add a station match for a name.
    pub fn with_station(mut self, name: &str, station: StationDto) -> Self {
        self.stations
            .entry(normalize_location(name))
            .or_default()
            .push(station);
        self
    }

    /// Set the plan returned for every plan request.
    pub fn with_plan(mut self, plan: PlanResponse) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Make every request fail with the given API status.
    pub fn with_failure(mut self, status: u16, message: impl Into<String>) -> Self {
        self.failure = Some((status, message.into()));
        self
    }

    /// Names passed to `find_stations`, in call order.
    pub fn station_lookups(&self) -> Vec<String> {
        self.recorded().station_lookups.clone()
    }

    /// Requests passed to `plan_connection`, in call order.
    pub fn plan_requests(&self) -> Vec<PlanRequest> {
        self.recorded().plan_requests.clone()
    }

    /// Total number of upstream calls received.
    pub fn call_count(&self) -> usize {
        let recorded = self.recorded();
        recorded.station_lookups.len() + recorded.plan_requests.len()
    }

    fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_failure(&self) -> Result<(), DigitransitError> {
        match &self.failure {
            Some((status, message)) => Err(DigitransitError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl TransitApi for MockTransitClient {
    async fn find_stations(&self, name: &str) -> Result<Vec<StationDto>, DigitransitError> {
        self.recorded().station_lookups.push(name.to_string());
        self.check_failure()?;

        Ok(self.stations.get(name).cloned().unwrap_or_default())
    }

    async fn plan_connection(
        &self,
        request: &PlanRequest,
    ) -> Result<PlanResponse, DigitransitError> {
        self.recorded().plan_requests.push(request.clone());
        self.check_failure()?;

        let plan = self.plan.clone().unwrap_or_else(PlanResponse::empty);
        ensure_data(&plan, "planConnection")?;
        Ok(plan)
    }
}
