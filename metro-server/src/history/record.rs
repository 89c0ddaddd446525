//! A single completed trip and its text rendering.

use std::fmt;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::carbon;
use crate::domain::{Fare, Route};
use crate::last_mile::TransportOption;

const RULE: &str = "════════════════════════════════════════════════";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The onward leg taken after leaving the metro.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastMileLeg {
    pub destination: String,
    pub option: TransportOption,
}

/// A completed trip: a metro route plus an optional last-mile leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub recorded_at: NaiveDateTime,
    pub route: Route,
    pub metro_fare: Fare,
    pub last_mile: Option<LastMileLeg>,
}

impl TripRecord {
    /// A trip recorded at the current local time.
    pub fn new(route: Route, metro_fare: Fare, last_mile: Option<LastMileLeg>) -> Self {
        Self {
            recorded_at: Local::now().naive_local(),
            route,
            metro_fare,
            last_mile,
        }
    }

    pub fn at(mut self, recorded_at: NaiveDateTime) -> Self {
        self.recorded_at = recorded_at;
        self
    }

    pub fn metro_distance_km(&self) -> f64 {
        carbon::distance_km(self.route.station_count())
    }

    pub fn last_mile_distance_km(&self) -> f64 {
        self.last_mile
            .as_ref()
            .map_or(0.0, |leg| leg.option.distance_km.max(0.0))
    }

    pub fn total_distance_km(&self) -> f64 {
        self.metro_distance_km() + self.last_mile_distance_km()
    }

    pub fn total_fare(&self) -> Fare {
        match &self.last_mile {
            Some(leg) => self.metro_fare + leg.option.fare,
            None => self.metro_fare,
        }
    }

    /// Only the metro part of the trip counts towards CO₂ savings.
    pub fn co2_saved_kg(&self) -> f64 {
        carbon::co2_saved_kg(self.metro_distance_km())
    }
}

impl fmt::Display for TripRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "   TRIP DETAILS")?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;
        writeln!(f, "Date & Time: {}", self.recorded_at.format(TIMESTAMP_FORMAT))?;
        writeln!(f)?;
        writeln!(f, "Metro Journey:")?;
        writeln!(f, "  From: {}", self.route.origin())?;
        writeln!(f, "  To: {}", self.route.destination())?;
        writeln!(f, "  Via: {}", self.route)?;
        writeln!(f, "  Metro Fare: {}", self.metro_fare)?;

        if let Some(leg) = &self.last_mile {
            writeln!(f)?;
            writeln!(f, "Last Mile Connection:")?;
            writeln!(f, "  To: {}", leg.destination)?;
            writeln!(f, "  Mode: {}", leg.option.mode)?;
            writeln!(f, "  Fare: {}", leg.option.fare)?;
            writeln!(f, "  Est. Time: {} minutes", leg.option.estimated_minutes)?;
        }

        writeln!(f)?;
        writeln!(f, "Trip Summary:")?;
        writeln!(f, "  Total Distance: {:.1} km", self.total_distance_km())?;
        writeln!(f, "  Total Fare: {}", self.total_fare())?;
        writeln!(f, "  CO₂ Saved: {}", carbon::format_co2(self.co2_saved_kg()))?;
        writeln!(f, "{RULE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationName;
    use crate::last_mile::TransportMode;
    use chrono::NaiveDate;

    fn route(names: &[&str]) -> Route {
        Route::new(names.iter().map(|s| StationName::parse(s).unwrap()).collect()).unwrap()
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn metro_only() -> TripRecord {
        TripRecord::new(
            route(&["Ameerpet", "Punjagutta", "Irrum Manzil"]),
            Fare::new(10.0).unwrap(),
            None,
        )
        .at(noon())
    }

    fn with_auto() -> TripRecord {
        let leg = LastMileLeg {
            destination: "Banjara Hills".into(),
            option: TransportOption::new(TransportMode::Auto, 4.0, false),
        };
        TripRecord {
            last_mile: Some(leg),
            ..metro_only()
        }
    }

    #[test]
    fn metro_only_totals() {
        let trip = metro_only();
        assert_eq!(trip.metro_distance_km(), 3.0);
        assert_eq!(trip.last_mile_distance_km(), 0.0);
        assert_eq!(trip.total_fare().amount(), 10.0);
        assert!((trip.co2_saved_kg() - 0.36).abs() < 1e-9);
    }

    #[test]
    fn last_mile_adds_distance_and_fare() {
        let trip = with_auto();
        assert_eq!(trip.total_distance_km(), 7.0);
        assert_eq!(trip.total_fare().amount(), 70.0);
        // Last-mile distance does not change the CO₂ figure.
        assert_eq!(trip.co2_saved_kg(), metro_only().co2_saved_kg());
    }

    #[test]
    fn renders_metro_only() {
        let text = metro_only().to_string();
        assert!(text.contains("Date & Time: 2024-03-15 12:00:00"));
        assert!(text.contains("  From: Ameerpet\n"));
        assert!(text.contains("  To: Irrum Manzil\n"));
        assert!(text.contains("  Via: Ameerpet -> Punjagutta -> Irrum Manzil\n"));
        assert!(text.contains("  Metro Fare: ₹10\n"));
        assert!(!text.contains("Last Mile Connection"));
        assert!(text.contains("  Total Distance: 3.0 km\n"));
        assert!(text.contains("  CO₂ Saved: 360.00 g\n"));
    }

    #[test]
    fn renders_last_mile_block() {
        let text = with_auto().to_string();
        assert!(text.contains("Last Mile Connection:\n  To: Banjara Hills\n  Mode: Auto\n"));
        assert!(text.contains("  Fare: ₹60\n"));
        assert!(text.contains("  Total Fare: ₹70\n"));
    }
}
