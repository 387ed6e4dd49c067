//! Route summary types.
//!
//! A `RouteSummary` is one candidate itinerary as returned by the planner,
//! flattened to its start/end times and an ordered list of legs.

use std::fmt;

/// Rendered when a leg has no scheduled trip (e.g. walking).
pub const NO_TRIP: &str = "N/A";

/// Rendered when a leg's trip carries no short name.
pub const UNNAMED_TRIP: &str = "N";

/// Route identifier of a leg, as shown to riders.
///
/// Keeps "no trip at all" and "trip without a name" apart so that
/// consumers can tell a walk from an unnamed scheduled service.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::RouteName;
///
/// assert_eq!(RouteName::NoTrip.as_str(), "N/A");
/// assert_eq!(RouteName::UnnamedTrip.as_str(), "N");
/// assert_eq!(RouteName::Named("550".into()).as_str(), "550");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteName {
    /// The leg is not part of a scheduled trip
    NoTrip,
    /// The leg rides a trip that has no short name
    UnnamedTrip,
    /// The trip's short name (e.g. "550", "M1")
    Named(String),
}

impl RouteName {
    /// Resolve from the upstream trip field.
    ///
    /// The outer `Option` is the trip itself, the inner one its short name.
    pub fn from_trip(trip: Option<Option<&str>>) -> Self {
        match trip {
            None => RouteName::NoTrip,
            Some(None) => RouteName::UnnamedTrip,
            Some(Some(name)) => RouteName::Named(name.to_string()),
        }
    }

    /// Returns the display form, substituting sentinels for missing names.
    pub fn as_str(&self) -> &str {
        match self {
            RouteName::NoTrip => NO_TRIP,
            RouteName::UnnamedTrip => UNNAMED_TRIP,
            RouteName::Named(name) => name,
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mode-homogeneous segment of a journey.
///
/// Every field is always populated; absent upstream values are replaced
/// with sentinels when the leg is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    /// Travel mode (e.g. "WALK", "BUS")
    pub mode: String,
    /// Name of the place the leg starts from
    pub from_name: String,
    /// Name of the place the leg ends at
    pub to_name: String,
    /// Route identifier
    pub route_name: RouteName,
}

/// A candidate itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    /// Departure as `yyyymmddHHMMSS`, if the upstream gave a parseable one
    pub start_time: Option<u64>,
    /// Arrival as `yyyymmddHHMMSS`, if the upstream gave a parseable one
    pub end_time: Option<u64>,
    /// Legs in travel order
    pub legs: Vec<Leg>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_name_from_trip() {
        assert_eq!(RouteName::from_trip(None), RouteName::NoTrip);
        assert_eq!(RouteName::from_trip(Some(None)), RouteName::UnnamedTrip);
        assert_eq!(
            RouteName::from_trip(Some(Some("M1"))),
            RouteName::Named("M1".to_string())
        );
    }

    #[test]
    fn sentinels_are_distinct() {
        assert_ne!(RouteName::NoTrip.as_str(), RouteName::UnnamedTrip.as_str());
        assert_eq!(RouteName::NoTrip.to_string(), "N/A");
        assert_eq!(RouteName::UnnamedTrip.to_string(), "N");
    }

    #[test]
    fn named_route_displays_name() {
        assert_eq!(RouteName::Named("550".into()).to_string(), "550");
    }
}
