//! Digitransit client error types.

/// Errors from talking to the Digitransit GraphQL API.
#[derive(Debug, thiserror::Error)]
pub enum DigitransitError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// GraphQL reported errors and returned no data
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Rate limited by the API
    #[error("rate limited by Digitransit API")]
    RateLimited,

    /// Subscription key missing or rejected
    #[error("unauthorized: check DIGITRANSIT_API_KEY")]
    Unauthorized,

    /// Client settings are unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Offline fixture could not be loaded
    #[error("fixture error: {0}")]
    Fixture(String),
}
