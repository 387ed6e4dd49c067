//! Server configuration read from the environment.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::digitransit::DigitransitConfig;
use crate::domain::DEFAULT_UTC_OFFSET_HOURS;
use crate::planner::LookupConfig;

pub const API_KEY_VAR: &str = "DIGITRANSIT_API_KEY";
pub const BASE_URL_VAR: &str = "DIGITRANSIT_BASE_URL";
pub const TIMEOUT_VAR: &str = "DIGITRANSIT_TIMEOUT_SECS";
pub const BIND_ADDR_VAR: &str = "ITINERARY_BIND_ADDR";
pub const UTC_OFFSET_VAR: &str = "ITINERARY_UTC_OFFSET_HOURS";
pub const MOCK_FIXTURE_VAR: &str = "ITINERARY_MOCK_FIXTURE";

/// Listen address when none is configured.
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3000));

/// Error from reading the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Everything `main` needs to start serving.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,

    /// Upstream API settings
    pub digitransit: DigitransitConfig,

    /// Route lookup settings
    pub lookup: LookupConfig,

    /// Serve from this fixture file instead of the live API
    pub mock_fixture: Option<PathBuf>,
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// Unset and empty variables fall back to their defaults.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| var(name).filter(|value| !value.trim().is_empty());

        let api_key = var(API_KEY_VAR).unwrap_or_else(|| {
            warn!("{API_KEY_VAR} not set. API calls will fail.");
            String::new()
        });

        let mut digitransit = DigitransitConfig::new(api_key);
        if let Some(url) = var(BASE_URL_VAR) {
            digitransit = digitransit.with_base_url(url);
        }
        if let Some(secs) = parse(TIMEOUT_VAR, var(TIMEOUT_VAR))? {
            digitransit = digitransit.with_timeout(secs);
        }

        let bind_addr = parse(BIND_ADDR_VAR, var(BIND_ADDR_VAR))?.unwrap_or(DEFAULT_BIND_ADDR);

        let offset = var(UTC_OFFSET_VAR);
        let utc_offset_hours: i32 =
            parse(UTC_OFFSET_VAR, offset.clone())?.unwrap_or(DEFAULT_UTC_OFFSET_HOURS);
        if !(-23..=23).contains(&utc_offset_hours) {
            return Err(ConfigError::Invalid {
                name: UTC_OFFSET_VAR,
                value: offset.unwrap_or_default(),
            });
        }

        Ok(Self {
            bind_addr,
            digitransit,
            lookup: LookupConfig::new(utc_offset_hours),
            mock_fixture: var(MOCK_FIXTURE_VAR).map(PathBuf::from),
        })
    }
}

fn parse<T: FromStr>(name: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError> {
    value
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value })
        })
        .transpose()
}
