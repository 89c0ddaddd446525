//! Caching layer for planned routes.
//!
//! The network is fixed for the lifetime of the server, so a plan only
//! goes stale if the planner configuration changes. The TTL bounds how long
//! that can take to show up; capacity bounds memory.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::planner::{RouteError, RoutePlan, RoutePlanner};

/// Cache key: (start, end) exactly as requested.
type RouteKey = (String, String);

/// Configuration for the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Cache of successful route plans. Failed lookups are never stored.
pub struct RouteCache {
    plans: MokaCache<RouteKey, Arc<RoutePlan>>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { plans }
    }

    pub async fn get(&self, start: &str, end: &str) -> Option<Arc<RoutePlan>> {
        self.plans.get(&(start.to_string(), end.to_string())).await
    }

    pub async fn insert(&self, start: &str, end: &str, plan: Arc<RoutePlan>) {
        self.plans
            .insert((start.to_string(), end.to_string()), plan)
            .await;
    }

    /// Return the cached plan, or plan the route and cache it on success.
    pub async fn get_or_plan(
        &self,
        planner: &RoutePlanner<'_>,
        start: &str,
        end: &str,
    ) -> Result<Arc<RoutePlan>, RouteError> {
        if let Some(cached) = self.get(start, end).await {
            trace!(start, end, "Route cache hit");
            return Ok(cached);
        }

        let plan = Arc::new(planner.plan(start, end)?);
        self.insert(start, end, plan.clone()).await;
        Ok(plan)
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.plans.invalidate_all();
    }
}
