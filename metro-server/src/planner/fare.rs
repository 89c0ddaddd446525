//! Tiered fare table.
//!
//! Fares depend only on how many stations a route passes through, both
//! endpoints included.

use crate::domain::Fare;

/// One step of the fare table: routes of up to `max_stations` stations
/// cost `fare`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareTier {
    pub max_stations: usize,
    pub fare: Fare,
}

impl FareTier {
    pub fn new(max_stations: usize, fare: Fare) -> Self {
        Self { max_stations, fare }
    }
}

/// Step function from station count to fare.
#[derive(Debug, Clone, PartialEq)]
pub struct FareTable {
    /// Tiers in ascending `max_stations` order.
    tiers: Vec<FareTier>,
    /// Fare for routes longer than the last tier.
    beyond: Fare,
    /// Flat fare charged when no route could be planned.
    fallback: Fare,
}

impl FareTable {
    /// Create a table from tiers in any order.
    pub fn new(mut tiers: Vec<FareTier>, beyond: Fare, fallback: Fare) -> Self {
        tiers.sort_by_key(|t| t.max_stations);
        Self {
            tiers,
            beyond,
            fallback,
        }
    }

    /// Fare for a route with `station_count` stations.
    pub fn fare_for(&self, station_count: usize) -> Fare {
        self.tiers
            .iter()
            .find(|tier| station_count <= tier.max_stations)
            .map_or(self.beyond, |tier| tier.fare)
    }

    /// Flat fare for trips that could not be routed.
    pub fn fallback(&self) -> Fare {
        self.fallback
    }

    pub fn tiers(&self) -> &[FareTier] {
        &self.tiers
    }

    pub fn beyond(&self) -> Fare {
        self.beyond
    }
}

impl Default for FareTable {
    fn default() -> Self {
        Self::new(
            vec![
                FareTier::new(2, Fare::from_static(10.0)),
                FareTier::new(5, Fare::from_static(15.0)),
                FareTier::new(9, Fare::from_static(20.0)),
                FareTier::new(16, Fare::from_static(30.0)),
            ],
            Fare::from_static(40.0),
            Fare::from_static(20.0),
        )
    }
}
