//! Last-mile transport quotes.
//!
//! Once a passenger leaves the metro they may continue by bus, auto,
//! cab, bike taxi, or e-bike. Each mode has a per-kilometre rate, a
//! minimum chargeable distance, and a surcharge during peak hours.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::domain::Fare;

/// Fares are rounded up to a multiple of this many rupees.
const FARE_ROUNDING: f64 = 5.0;

/// Minutes added to every trip for pickup and drop-off.
const PICKUP_MINS: u32 = 5;

/// Peak windows as half-open `[start, end)` hours.
const PEAK_HOURS: [(u32, u32); 2] = [(8, 11), (17, 21)];

/// A last-mile transport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    RtcBus,
    Auto,
    Ola,
    Uber,
    Rapido,
    EBike,
}

impl TransportMode {
    /// Every mode, in display order.
    pub const ALL: [TransportMode; 6] = [
        TransportMode::RtcBus,
        TransportMode::Auto,
        TransportMode::Ola,
        TransportMode::Uber,
        TransportMode::Rapido,
        TransportMode::EBike,
    ];

    /// Stable identifier, matching the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            TransportMode::RtcBus => "rtc_bus",
            TransportMode::Auto => "auto",
            TransportMode::Ola => "ola",
            TransportMode::Uber => "uber",
            TransportMode::Rapido => "rapido",
            TransportMode::EBike => "e_bike",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TransportMode::RtcBus => "TSRTC Bus",
            TransportMode::Auto => "Auto",
            TransportMode::Ola => "Ola Cab",
            TransportMode::Uber => "Uber",
            TransportMode::Rapido => "Rapido Bike",
            TransportMode::EBike => "Metro E-Bike",
        }
    }

    /// Rupees per kilometre.
    pub fn rate_per_km(self) -> f64 {
        match self {
            TransportMode::RtcBus => 10.0,
            TransportMode::Auto => 15.0,
            TransportMode::Ola | TransportMode::Uber => 20.0,
            TransportMode::Rapido => 12.0,
            TransportMode::EBike => 8.0,
        }
    }

    pub fn peak_multiplier(self) -> f64 {
        match self {
            TransportMode::RtcBus | TransportMode::Rapido => 1.2,
            TransportMode::Auto => 1.3,
            TransportMode::Ola | TransportMode::Uber => 1.4,
            TransportMode::EBike => 1.0,
        }
    }

    /// Shortest distance charged, in kilometres.
    pub fn minimum_km(self) -> f64 {
        match self {
            TransportMode::RtcBus => 5.0,
            TransportMode::Auto | TransportMode::Rapido => 2.0,
            TransportMode::Ola | TransportMode::Uber => 3.0,
            TransportMode::EBike => 1.0,
        }
    }

    /// Flat booking fee added after the peak surcharge.
    pub fn booking_fee(self) -> f64 {
        match self {
            TransportMode::Ola | TransportMode::Uber => 25.0,
            _ => 0.0,
        }
    }

    /// Average speed in km/h.
    pub fn speed_kmph(self) -> f64 {
        match self {
            TransportMode::RtcBus => 20.0,
            TransportMode::Auto => 25.0,
            TransportMode::Ola | TransportMode::Uber => 30.0,
            TransportMode::Rapido | TransportMode::EBike => 35.0,
        }
    }

    /// Fare for `distance_km`, rounded up to the next ₹5.
    pub fn fare(self, distance_km: f64, peak: bool) -> Fare {
        let chargeable = distance_km.max(self.minimum_km());
        let mut amount = self.rate_per_km() * chargeable;
        if peak {
            amount *= self.peak_multiplier();
        }
        amount += self.booking_fee();
        let rounded = (amount / FARE_ROUNDING).ceil() * FARE_ROUNDING;
        Fare::new(rounded).unwrap_or(Fare::ZERO)
    }

    /// Estimated door-to-door minutes for `distance_km`.
    pub fn estimated_minutes(self, distance_km: f64) -> u32 {
        let riding = (distance_km.max(0.0) / self.speed_kmph() * 60.0).ceil() as u32;
        riding.saturating_add(PICKUP_MINS)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when parsing an unknown transport mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport mode: {0}")]
pub struct UnknownTransportMode(String);

impl FromStr for TransportMode {
    type Err = UnknownTransportMode;

    /// Accepts the snake_case key or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.key() == wanted || mode.display_name().to_lowercase() == wanted)
            .ok_or_else(|| UnknownTransportMode(s.to_string()))
    }
}

/// One priced option for the last mile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransportOption {
    pub mode: TransportMode,
    pub fare: Fare,
    pub estimated_minutes: u32,
    pub distance_km: f64,
}

impl TransportOption {
    pub fn new(mode: TransportMode, distance_km: f64, peak: bool) -> Self {
        Self {
            mode,
            fare: mode.fare(distance_km, peak),
            estimated_minutes: mode.estimated_minutes(distance_km),
            distance_km,
        }
    }
}

/// All options for reaching a destination from the exit station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastMileQuote {
    pub destination: String,
    pub distance_km: f64,
    pub peak: bool,
    /// Cheapest first; equal fares keep display order.
    pub options: Vec<TransportOption>,
}

/// Quote every mode for a trip of `distance_km` to `destination`.
pub fn quote(destination: &str, distance_km: f64, peak: bool) -> LastMileQuote {
    let mut options: Vec<TransportOption> = TransportMode::ALL
        .into_iter()
        .map(|mode| TransportOption::new(mode, distance_km, peak))
        .collect();
    options.sort_by(|a, b| a.fare.amount().total_cmp(&b.fare.amount()));

    LastMileQuote {
        destination: destination.to_string(),
        distance_km,
        peak,
        options,
    }
}

/// Whether `time` falls in a peak window (08:00–11:00 or 17:00–21:00).
pub fn is_peak_hour(time: NaiveTime) -> bool {
    let hour = time.hour();
    PEAK_HOURS
        .iter()
        .any(|&(start, end)| hour >= start && hour < end)
}

/// Whether the local clock is currently in a peak window.
pub fn is_peak_now() -> bool {
    is_peak_hour(Local::now().time())
}
