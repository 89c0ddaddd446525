//! Route planner over the metro network.
//!
//! Answers three questions for a pair of stations: the route with the
//! fewest stations (breadth-first search), the fare for it (tiered by
//! station count), and the travel time (per-stop time plus a penalty for
//! each change of line).

mod config;
mod fare;
mod search;

pub use config::PlannerConfig;
pub use fare::{FareTable, FareTier};
pub use search::{RideLeg, RouteError, RoutePlan, RoutePlanner};
