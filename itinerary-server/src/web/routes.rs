//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::planner::{LookupError, RouteQuery, TransitApi};

use super::dto::*;
use super::state::AppState;

/// `outcome` field values on the final event of each route request.
const OUTCOME_BAD_REQUEST: &str = "bad_request";
const OUTCOME_SUCCESS: &str = "success";
const OUTCOME_FAILURE: &str = "failure";

/// Create the application router.
pub fn create_router<C>(state: AppState<C>) -> Router
where
    C: TransitApi + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/routes", get(get_routes::<C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Route lookup endpoint.
///
/// `GET /routes?start=<place>&stop=<place>&time=<yyyymmddHHMMSS>`
async fn get_routes<C>(
    State(state): State<AppState<C>>,
    query: Result<Query<RoutesRequest>, QueryRejection>,
) -> Result<Json<Vec<RouteResult>>, AppError>
where
    C: TransitApi + Send + Sync + 'static,
{
    let Query(req) = query.map_err(|rejection| {
        let message = rejection.body_text();
        warn!(outcome = OUTCOME_BAD_REQUEST, error = %message, "malformed query string");
        AppError::BadRequest { message }
    })?;

    info!(
        start = ?req.start,
        stop = ?req.stop,
        time = ?req.time,
        "route request"
    );

    let query = RouteQuery::from_params(
        req.start.as_deref(),
        req.stop.as_deref(),
        req.time.as_deref(),
    )
    .map_err(|e| {
        warn!(outcome = OUTCOME_BAD_REQUEST, error = %e, "rejected route request");
        AppError::from(e)
    })?;

    let routes = state.lookup.get_routes(&query).await.map_err(|e| {
        error!(
            outcome = OUTCOME_FAILURE,
            start = %query.origin,
            stop = %query.destination,
            time = query.latest_arrival,
            error = %e,
            "route lookup failed"
        );
        AppError::from(e)
    })?;

    info!(outcome = OUTCOME_SUCCESS, routes = routes.len(), "route request served");

    Ok(Json(routes.iter().map(RouteResult::from_summary).collect()))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::InvalidRequest(message) => AppError::BadRequest { message },
            LookupError::NotFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            LookupError::Upstream(_) | LookupError::Format(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digitransit::{MockTransitClient, PlanResponse, StationDto};
    use crate::planner::{LookupConfig, RouteLookup};
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// Captures formatted log output for the current thread.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        (buffer, tracing::subscriber::set_default(subscriber))
    }

    fn station(name: &str, lat: f64, lon: f64) -> StationDto {
        StationDto {
            gtfs_id: format!("HSL:{name}"),
            name: name.to_string(),
            lat,
            lon,
        }
    }

    fn plan() -> PlanResponse {
        serde_json::from_value(json!({
            "data": {
                "planConnection": {
                    "edges": [{
                        "node": {
                            "start": "2025-09-09T08:20:00+03:00",
                            "end": "2025-09-09T08:40:00+03:00",
                            "legs": [
                                {
                                    "mode": "WALK",
                                    "from": {"name": "Aalto Yliopisto"},
                                    "to": {"name": "Otaniemi Metro"},
                                    "trip": null
                                },
                                {
                                    "mode": "BUS",
                                    "from": {"name": "Otaniemi Metro"},
                                    "to": {"name": "Tapiola"},
                                    "trip": {"routeShortName": null}
                                },
                                {
                                    "mode": "METRO",
                                    "from": {"name": "Tapiola"},
                                    "to": {"name": "Keilaniemi"},
                                    "trip": {"routeShortName": "M1"}
                                }
                            ]
                        }
                    }]
                }
            }
        }))
        .unwrap()
    }

    fn client() -> MockTransitClient {
        MockTransitClient::new()
            .with_station("Aalto-Yliopisto", station("Aalto-Yliopisto", 60.186, 24.828))
            .with_station("Keilaniemi", station("Keilaniemi", 60.180, 24.820))
            .with_plan(plan())
    }

    fn app(client: MockTransitClient) -> Router {
        let lookup = RouteLookup::new(client, LookupConfig::default());
        create_router(AppState::new(lookup))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = get(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = get(app(client()), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn routes_are_returned_as_json() {
        let (status, body) = get_json(
            app(client()),
            "/routes?start=Aalto%20Yliopisto&stop=Keilaniemi&time=20250909084000",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "start_time": 20250909082000u64,
                "end_time": 20250909084000u64,
                "legs": [
                    {"mode": "WALK", "from": "Aalto Yliopisto", "to": "Otaniemi Metro", "route_name": "N/A"},
                    {"mode": "BUS", "from": "Otaniemi Metro", "to": "Tapiola", "route_name": "N"},
                    {"mode": "METRO", "from": "Tapiola", "to": "Keilaniemi", "route_name": "M1"}
                ]
            }])
        );
    }

    #[tokio::test]
    async fn missing_parameters_are_rejected_before_lookup() {
        let mock = client();

        for uri in [
            "/routes",
            "/routes?start=Aalto&stop=Keilaniemi",
            "/routes?stop=Keilaniemi&time=20250909084000",
            "/routes?start=&stop=Keilaniemi&time=20250909084000",
        ] {
            let (status, body) = get_json(app(mock.clone()), uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, json!({"error": "Missing required parameters"}));
        }

        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn non_numeric_time_is_bad_request() {
        let mock = client();
        let (status, body) = get_json(
            app(mock.clone()),
            "/routes?start=Aalto&stop=Keilaniemi&time=tomorrow",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid time: tomorrow"}));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_place_is_not_found() {
        let (status, body) = get_json(
            app(client()),
            "/routes?start=Atlantis&stop=Keilaniemi&time=20250909084000",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "location not found: Atlantis"}));
    }

    #[tokio::test]
    async fn upstream_failure_is_internal_error() {
        let mock = client().with_failure(503, "Service Unavailable");
        let (status, body) = get_json(
            app(mock),
            "/routes?start=Aalto%20Yliopisto&stop=Keilaniemi&time=20250909084000",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "API error 503: Service Unavailable"}));
    }

    #[tokio::test]
    async fn invalid_calendar_time_is_internal_error() {
        let (status, body) = get_json(
            app(client()),
            "/routes?start=Aalto%20Yliopisto&stop=Keilaniemi&time=20251340084000",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("invalid timestamp"));
    }

    #[tokio::test]
    async fn repeated_parameter_is_json_bad_request() {
        let mock = client();
        let (status, body) = get_json(
            app(mock.clone()),
            "/routes?start=Aalto&start=Otaniemi&stop=Keilaniemi&time=20250909084000",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("duplicate field `start`"), "{message}");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn outcomes_are_logged() {
        let (logs, _guard) = capture_logs();

        get(app(client()), "/routes?start=Aalto").await;
        get(
            app(client()),
            "/routes?start=Aalto%20Yliopisto&stop=Keilaniemi&time=20250909084000",
        )
        .await;
        get(
            app(client()),
            "/routes?start=Atlantis&stop=Keilaniemi&time=20250909084000",
        )
        .await;

        let output = logs.contents();
        assert!(output.contains("outcome=\"bad_request\""), "{output}");
        assert!(output.contains("outcome=\"success\""), "{output}");
        assert!(output.contains("outcome=\"failure\""), "{output}");
    }
}
