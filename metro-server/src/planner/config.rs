//! Planner configuration.

use super::fare::FareTable;

/// Parameters for time and fare estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Minutes added for each edge travelled.
    pub per_stop_mins: u32,

    /// Minutes added each time the route changes line.
    pub transfer_penalty_mins: u32,

    /// Station-count fare tiers and the fallback fare.
    pub fares: FareTable,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(per_stop_mins: u32, transfer_penalty_mins: u32, fares: FareTable) -> Self {
        Self {
            per_stop_mins,
            transfer_penalty_mins,
            fares,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            per_stop_mins: 2,
            transfer_penalty_mins: 3,
            fares: FareTable::default(),
        }
    }
}
