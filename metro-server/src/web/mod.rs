//! Web layer for the metro route planner.
//!
//! Provides JSON endpoints for route planning, fares, last-mile quotes,
//! and trip history.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
