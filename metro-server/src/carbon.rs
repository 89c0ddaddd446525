//! Carbon savings of a metro trip compared with driving.
//!
//! Distance is estimated from the number of stations travelled, assuming
//! stations are evenly spaced.

use crate::domain::Route;

/// Average distance between consecutive stations, in kilometres.
pub const KM_PER_HOP: f64 = 1.5;

/// CO₂ avoided per kilometre travelled by metro instead of car, in kg.
pub const CO2_KG_PER_KM: f64 = 0.12;

/// Estimated metro distance for a number of stations (endpoints included).
pub fn distance_km(station_count: usize) -> f64 {
    if station_count <= 1 {
        return 0.0;
    }
    (station_count - 1) as f64 * KM_PER_HOP
}

/// CO₂ saved over `distance_km` kilometres.
pub fn co2_saved_kg(distance_km: f64) -> f64 {
    distance_km * CO2_KG_PER_KM
}

/// Carbon summary of a planned route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonFootprint {
    pub distance_km: f64,
    pub co2_saved_kg: f64,
}

impl CarbonFootprint {
    pub fn for_route(route: &Route) -> Self {
        let distance_km = distance_km(route.station_count());
        Self {
            distance_km,
            co2_saved_kg: co2_saved_kg(distance_km),
        }
    }
}

/// Format a CO₂ mass: grams below one kilogram, kilograms otherwise.
pub fn format_co2(kg: f64) -> String {
    if kg < 1.0 {
        format!("{:.2} g", kg * 1000.0)
    } else {
        format!("{:.2} kg", kg)
    }
}
