//! Route lookup configuration.

use crate::digitransit::{DEFAULT_TRANSIT_MODES, TransitMode};
use crate::domain::DEFAULT_UTC_OFFSET_HOURS;

/// Configuration parameters for route lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// UTC offset (hours) attached to the caller's latest-arrival time.
    pub utc_offset_hours: i32,

    /// Transit modes the upstream planner may use.
    pub modes: Vec<TransitMode>,
}

impl LookupConfig {
    /// Create a configuration with the given offset and the default modes.
    pub fn new(utc_offset_hours: i32) -> Self {
        Self {
            utc_offset_hours,
            ..Self::default()
        }
    }

    /// Restrict lookups to the given modes.
    pub fn with_modes(mut self, modes: &[TransitMode]) -> Self {
        self.modes = modes.to_vec();
        self
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            modes: DEFAULT_TRANSIT_MODES.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = LookupConfig::default();

        assert_eq!(config.utc_offset_hours, 3);
        assert_eq!(
            config.modes,
            vec![
                TransitMode::Bus,
                TransitMode::Rail,
                TransitMode::Tram,
                TransitMode::Ferry
            ]
        );
    }

    #[test]
    fn custom_config() {
        let config = LookupConfig::new(2).with_modes(&[TransitMode::Tram]);

        assert_eq!(config.utc_offset_hours, 2);
        assert_eq!(config.modes, vec![TransitMode::Tram]);
    }
}
