//! Route type.
//!
//! A `Route` is the ordered list of stations a passenger passes through,
//! both endpoints included.

use std::fmt;

use serde::Serialize;

use super::{DomainError, StationName};

/// An ordered sequence of stations from origin to destination.
///
/// # Invariants
///
/// - At least 2 stations
/// - Origin and destination differ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Route {
    stations: Vec<StationName>,
}

impl Route {
    /// Constructs a route from stations in travel order.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 stations are given or the route
    /// ends where it started.
    pub fn new(stations: Vec<StationName>) -> Result<Self, DomainError> {
        if stations.len() < 2 {
            return Err(DomainError::RouteTooShort(stations.len()));
        }
        if stations.first() == stations.last() {
            return Err(DomainError::CircularRoute(stations[0].clone()));
        }
        Ok(Self { stations })
    }

    pub fn origin(&self) -> &StationName {
        &self.stations[0]
    }

    pub fn destination(&self) -> &StationName {
        &self.stations[self.stations.len() - 1]
    }

    pub fn stations(&self) -> &[StationName] {
        &self.stations
    }

    /// Number of stations including both endpoints.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of edges travelled.
    pub fn hops(&self) -> usize {
        self.stations.len() - 1
    }

    /// Consecutive station pairs, one per edge travelled.
    pub fn pairs(&self) -> impl Iterator<Item = (&StationName, &StationName)> {
        self.stations.windows(2).map(|w| (&w[0], &w[1]))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, station) in self.stations.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{station}")?;
        }
        Ok(())
    }
}
