//! Route lookup orchestration.
//!
//! This module ties the pieces together to answer:
//! "Which itineraries get me from here to there before this time?"
//!
//! The upstream is abstracted behind [`TransitApi`] so that lookups can run
//! against the live Digitransit API or against fixture data.

mod config;
mod lookup;


pub use config::LookupConfig;
pub use lookup::{LookupError, MISSING_PARAMETERS, RouteLookup, RouteQuery, TransitApi};
