//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::RouteCache;
use crate::history::TripHistory;
use crate::network::Network;
use crate::planner::{PlannerConfig, RoutePlanner};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// The metro network, fixed for the server's lifetime
    pub network: Arc<Network>,

    /// Route planner configuration
    pub config: Arc<PlannerConfig>,

    /// Recently planned routes
    pub cache: Arc<RouteCache>,

    /// Trip logs and travel stats
    pub history: Arc<TripHistory>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        network: Network,
        config: PlannerConfig,
        cache: RouteCache,
        history: TripHistory,
    ) -> Self {
        Self {
            network: Arc::new(network),
            config: Arc::new(config),
            cache: Arc::new(cache),
            history: Arc::new(history),
        }
    }

    pub fn planner(&self) -> RoutePlanner<'_> {
        RoutePlanner::new(&self.network, &self.config)
    }
}
