//! Domain types for the metro route planner.
//!
//! This module contains the value types shared by the network graph, the
//! planner, and the collaborators that consume planned routes. All types
//! enforce their invariants at construction time.

mod error;
mod fare;
mod route;
mod station;

pub use error::DomainError;
pub use fare::Fare;
pub use route::Route;
pub use station::{LineId, Station, StationKind, StationName};
