//! Itinerary server.
//!
//! A web service that answers: "Which public transport itineraries get me
//! from this place to that one, arriving no later than this time?"
//!
//! Place names are resolved and itineraries planned through the Digitransit
//! GraphQL API.

pub mod config;
pub mod digitransit;
pub mod domain;
pub mod planner;
pub mod web;
