//! Web layer for the itinerary server.
//!
//! Provides the HTTP endpoint for route lookups between named places.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
