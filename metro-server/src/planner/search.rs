//! Breadth-first route search.
//!
//! Finds the route with the fewest stations between two stations, then
//! derives line changes, travel time, and fare from it.

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use crate::domain::{DomainError, Fare, LineId, Route, StationName};
use crate::network::{Network, NetworkError, StationIndex};

use super::config::PlannerConfig;

/// Error from route planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// The station is not part of the network
    #[error("station not found: {0}")]
    UnknownStation(String),

    /// Start and end name the same station (compared ignoring case)
    #[error("start and end stations cannot be the same: {0}")]
    SameStation(String),

    /// The stations are in disconnected parts of the network
    #[error("no route found between {start} and {end}")]
    NoRoute { start: String, end: String },

    /// Graph lookup failed for a pair on a computed route
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// A computed route failed validation
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RouteError {
    /// Whether the request itself describes no valid trip.
    ///
    /// These are the errors absorbed by the fallback fare.
    pub fn is_invalid_route(&self) -> bool {
        matches!(self, RouteError::SameStation(_) | RouteError::NoRoute { .. })
    }
}

/// A stretch of a route ridden on one line without changing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideLeg {
    pub line: LineId,
    pub board: StationName,
    pub alight: StationName,
    /// Number of edges ridden on this line.
    pub hops: usize,
}

/// Everything the planner knows about a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub route: Route,
    pub fare: Fare,
    pub duration_mins: u32,
    pub transfers: usize,
    pub legs: Vec<RideLeg>,
}

impl RoutePlan {
    /// Stations where the passenger changes line, in travel order.
    pub fn interchanges(&self) -> impl Iterator<Item = &StationName> {
        self.legs.iter().skip(1).map(|leg| &leg.board)
    }
}

/// Route planner over a read-only network.
///
/// Holds no mutable state; any number of planners may share one network
/// across threads.
#[derive(Debug, Clone, Copy)]
pub struct RoutePlanner<'a> {
    network: &'a Network,
    config: &'a PlannerConfig,
}

impl<'a> RoutePlanner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network, config: &'a PlannerConfig) -> Self {
        Self { network, config }
    }

    pub fn network(&self) -> &'a Network {
        self.network
    }

    pub fn config(&self) -> &'a PlannerConfig {
        self.config
    }

    /// Find the route with the fewest stations from `start` to `end`.
    ///
    /// Neighbours are explored in the network's declaration order, so when
    /// several shortest routes exist the same one is returned every time.
    ///
    /// # Errors
    ///
    /// - [`RouteError::UnknownStation`] if either name is not in the network
    /// - [`RouteError::SameStation`] if the names match ignoring case
    /// - [`RouteError::NoRoute`] if `end` cannot be reached from `start`
    pub fn find_route(&self, start: &str, end: &str) -> Result<Route, RouteError> {
        let (from, to) = self.resolve(start, end)?;

        if self.network.station_at(from).name().eq_ignore_case(end) {
            return Err(RouteError::SameStation(start.to_string()));
        }

        let parents = self.search(from, to).ok_or_else(|| RouteError::NoRoute {
            start: start.to_string(),
            end: end.to_string(),
        })?;

        let mut path = vec![to];
        let mut current = to;
        while let Some(parent) = parents[current.0] {
            path.push(parent);
            current = parent;
        }
        path.reverse();

        let stations = path
            .into_iter()
            .map(|idx| self.network.station_at(idx).name().clone())
            .collect();
        Ok(Route::new(stations)?)
    }

    /// Resolve both endpoints, reporting the first unknown one.
    fn resolve(&self, start: &str, end: &str) -> Result<(StationIndex, StationIndex), RouteError> {
        let from = self
            .network
            .index_of(start)
            .ok_or_else(|| RouteError::UnknownStation(start.to_string()))?;
        let to = self
            .network
            .index_of(end)
            .ok_or_else(|| RouteError::UnknownStation(end.to_string()))?;
        Ok((from, to))
    }

    /// Unweighted BFS from `from`, stopping once `to` is dequeued.
    ///
    /// Returns the parent links, or `None` if `to` is unreachable.
    fn search(&self, from: StationIndex, to: StationIndex) -> Option<Vec<Option<StationIndex>>> {
        let count = self.network.station_count();
        let mut parents: Vec<Option<StationIndex>> = vec![None; count];
        let mut visited = vec![false; count];
        let mut queue = VecDeque::new();

        visited[from.0] = true;
        queue.push_back(from);
        let mut expanded = 0usize;

        while let Some(current) = queue.pop_front() {
            if current == to {
                break;
            }
            expanded += 1;

            for &next in self.network.neighbour_indices(current) {
                if visited[next.0] {
                    continue;
                }
                visited[next.0] = true;
                parents[next.0] = Some(current);
                queue.push_back(next);
            }
        }

        trace!(expanded, reached = visited[to.0], "BFS finished");

        visited[to.0].then_some(parents)
    }

    /// Number of line changes along `path`.
    ///
    /// Each edge contributes its canonical line; a transfer is counted
    /// whenever that line differs from the previous edge's. Pairs that are
    /// not adjacent are skipped.
    pub fn transfer_count<S: AsRef<str>>(&self, path: &[S]) -> usize {
        let mut transfers = 0;
        let mut previous: Option<LineId> = None;

        for pair in path.windows(2) {
            let (a, b) = (pair[0].as_ref(), pair[1].as_ref());
            let line = match self.network.line_of(a, b) {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Skipping non-adjacent pair while counting transfers");
                    continue;
                }
            };
            if previous.is_some_and(|p| p != line) {
                transfers += 1;
            }
            previous = Some(line);
        }

        transfers
    }

    /// Estimated travel time in minutes.
    ///
    /// `hops × per_stop_mins + transfers × transfer_penalty_mins`, or 0 for a
    /// path of fewer than 2 stations.
    pub fn estimate_time_minutes<S: AsRef<str>>(&self, path: &[S]) -> u32 {
        if path.len() <= 1 {
            return 0;
        }
        let hops = (path.len() - 1) as u32;
        let transfers = self.transfer_count(path) as u32;
        hops * self.config.per_stop_mins + transfers * self.config.transfer_penalty_mins
    }

    /// Fare for travelling from `start` to `end`.
    ///
    /// Never fails because the trip is invalid: same-station and unroutable
    /// requests are charged the fallback fare. Only an unknown station name
    /// is reported as an error.
    pub fn calculate_fare_between(&self, start: &str, end: &str) -> Result<Fare, RouteError> {
        self.resolve(start, end)?;

        match self.find_route(start, end) {
            Ok(route) => Ok(self.config.fares.fare_for(route.station_count())),
            Err(e) if e.is_invalid_route() => {
                debug!(start, end, reason = %e, "Charging fallback fare");
                Ok(self.config.fares.fallback())
            }
            Err(e) => Err(e),
        }
    }

    /// Plan a trip: route, fare, duration, transfers, and ride legs.
    pub fn plan(&self, start: &str, end: &str) -> Result<RoutePlan, RouteError> {
        let route = self.find_route(start, end)?;
        let legs = self.ride_legs(&route)?;
        let transfers = self.transfer_count(route.stations());
        let duration_mins = self.estimate_time_minutes(route.stations());
        let fare = self.config.fares.fare_for(route.station_count());

        debug!(
            start,
            end,
            stations = route.station_count(),
            transfers,
            duration_mins,
            fare = fare.amount(),
            "Planned route"
        );

        Ok(RoutePlan {
            route,
            fare,
            duration_mins,
            transfers,
            legs,
        })
    }

    /// Split a route into maximal runs on the same canonical line.
    pub fn ride_legs(&self, route: &Route) -> Result<Vec<RideLeg>, RouteError> {
        let mut legs: Vec<RideLeg> = Vec::new();

        for (a, b) in route.pairs() {
            let line = self.network.line_of(a.as_str(), b.as_str())?;
            match legs.last_mut() {
                Some(leg) if leg.line == line => {
                    leg.alight = b.clone();
                    leg.hops += 1;
                }
                _ => legs.push(RideLeg {
                    line,
                    board: a.clone(),
                    alight: b.clone(),
                    hops: 1,
                }),
            }
        }

        Ok(legs)
    }
}
