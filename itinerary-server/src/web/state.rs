//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::RouteLookup;

/// Shared application state.
///
/// Generic over the upstream so the router can be served against the live
/// API or against fixture data.
pub struct AppState<C> {
    /// Route lookup over the configured upstream
    pub lookup: Arc<RouteLookup<C>>,
}

impl<C> AppState<C> {
    /// Create a new app state.
    pub fn new(lookup: RouteLookup<C>) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }
}

// Derived Clone would require `C: Clone`.
impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
        }
    }
}
