//! Digitransit GraphQL HTTP client.
//!
//! Every query is a POST of `{"query", "variables"}` to a single endpoint,
//! authenticated with a subscription-key header.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::planner::TransitApi;

use super::error::DigitransitError;
use super::query::{GraphQlRequest, PlanRequest};
use super::types::{GraphQlResponse, PlanResponse, StationDto, StationsResponse};

/// Default GraphQL endpoint (HSL region, routing v2).
const DEFAULT_BASE_URL: &str = "https://api.digitransit.fi/routing/v2/hsl/gtfs/v1";

/// Header carrying the API subscription key.
const SUBSCRIPTION_KEY_HEADER: &str = "digitransit-subscription-key";

/// Longest response body excerpt kept in error values.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the Digitransit client.
#[derive(Debug, Clone)]
pub struct DigitransitConfig {
    /// Subscription key for the `digitransit-subscription-key` header
    pub api_key: String,
    /// GraphQL endpoint URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DigitransitConfig {
    /// Create a new config with the given subscription key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom endpoint URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Digitransit GraphQL API client.
#[derive(Debug, Clone)]
pub struct DigitransitClient {
    http: reqwest::Client,
    base_url: String,
}

impl DigitransitClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DigitransitConfig) -> Result<Self, DigitransitError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| {
            DigitransitError::InvalidConfig("API key is not a valid header value".to_string())
        })?;
        headers.insert(HeaderName::from_static(SUBSCRIPTION_KEY_HEADER), api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// POST a GraphQL request and deserialize the envelope.
    async fn post_graphql<T: DeserializeOwned>(
        &self,
        request: &GraphQlRequest,
    ) -> Result<GraphQlResponse<T>, DigitransitError> {
        let response = self.http.post(&self.base_url).json(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| DigitransitError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
        })
    }
}

impl TransitApi for DigitransitClient {
    async fn find_stations(&self, name: &str) -> Result<Vec<StationDto>, DigitransitError> {
        let response: StationsResponse =
            self.post_graphql(&GraphQlRequest::stations(name)).await?;
        ensure_data(&response, "stations")?;

        let stations = response
            .data
            .and_then(|data| data.stations)
            .unwrap_or_default();
        debug!(name, matches = stations.len(), "fetched stations");

        Ok(stations)
    }

    async fn plan_connection(
        &self,
        request: &PlanRequest,
    ) -> Result<PlanResponse, DigitransitError> {
        let response: PlanResponse = self
            .post_graphql(&GraphQlRequest::plan_connection(request))
            .await?;
        ensure_data(&response, "planConnection")?;
        debug!(latest_arrival = %request.latest_arrival, "planConnection response received");

        Ok(response)
    }
}

/// Map a non-success status to an error.
fn status_error(status: StatusCode, body: String) -> DigitransitError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DigitransitError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => DigitransitError::RateLimited,
        _ => DigitransitError::Api {
            status: status.as_u16(),
            message: body,
        },
    }
}

/// Fail on GraphQL errors that came without data; log the ones that didn't.
pub(crate) fn ensure_data<T>(
    response: &GraphQlResponse<T>,
    operation: &str,
) -> Result<(), DigitransitError> {
    let Some(message) = response.error_message() else {
        return Ok(());
    };

    if response.data.is_none() {
        return Err(DigitransitError::GraphQl(message));
    }

    warn!(operation, errors = %message, "partial GraphQL errors, using returned data");
    Ok(())
}
