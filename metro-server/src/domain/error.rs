//! Domain error types.
//!
//! These errors represent validation failures when constructing domain
//! values. They are distinct from graph construction and routing errors.

use super::StationName;

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Station names must contain at least one non-whitespace character
    #[error("station name must not be blank")]
    BlankStationName,

    /// A route needs both endpoints
    #[error("route must contain at least 2 stations, got {0}")]
    RouteTooShort(usize),

    /// A route must end somewhere other than where it started
    #[error("route starts and ends at {0}")]
    CircularRoute(StationName),

    /// Fares are non-negative finite amounts
    #[error("invalid fare amount: {0}")]
    InvalidFare(f64),
}
