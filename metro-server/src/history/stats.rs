//! Cumulative travel statistics for a user.

use serde::{Deserialize, Serialize};

use super::TripRecord;

/// Points for a trip of `distance_km`: ten per kilometre plus a flat five.
pub fn points_for(distance_km: f64) -> u64 {
    ((distance_km.max(0.0) * 10.0).floor() as u64).saturating_add(5)
}

/// Running totals across every recorded trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelStats {
    pub total_trips: u32,
    pub total_km: f64,
    pub total_co2_saved_kg: f64,
    pub longest_route_km: f64,
    /// `"Origin -> Destination"` of the longest trip so far.
    pub longest_route: Option<String>,
    pub points: u64,
}

impl TravelStats {
    /// Fold a trip into the totals.
    pub fn record(&mut self, trip: &TripRecord) {
        let distance = trip.total_distance_km();

        self.total_trips = self.total_trips.saturating_add(1);
        self.total_km += distance;
        self.total_co2_saved_kg += trip.co2_saved_kg();

        if distance > self.longest_route_km {
            self.longest_route_km = distance;
            self.longest_route = Some(format!(
                "{} -> {}",
                trip.route.origin(),
                trip.route.destination()
            ));
        }

        self.points = self.points.saturating_add(points_for(distance));
    }
}
