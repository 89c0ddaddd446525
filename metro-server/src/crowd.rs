//! Platform crowding along a route.
//!
//! Crowding is measured as platform crowd density: persons per square metre
//! of platform. Readings are supplied by the caller. A station without a
//! reading is assumed to be at [`DEFAULT_DENSITY`].

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::domain::{Route, StationName};

/// Density assumed for a station with no reading, in persons/m².
pub const DEFAULT_DENSITY: f64 = 1.0;

/// How crowded a platform is, from level 1 to level 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrowdLevel {
    Comfortable,
    Moderate,
    Busy,
    Uncomfortable,
    Critical,
}

impl CrowdLevel {
    /// Level for a density in persons/m². Each level spans one person per
    /// square metre; anything from 4 upwards is critical.
    pub fn from_density(density: f64) -> Self {
        if density < 1.0 {
            CrowdLevel::Comfortable
        } else if density < 2.0 {
            CrowdLevel::Moderate
        } else if density < 3.0 {
            CrowdLevel::Busy
        } else if density < 4.0 {
            CrowdLevel::Uncomfortable
        } else {
            CrowdLevel::Critical
        }
    }

    pub fn number(self) -> u8 {
        match self {
            CrowdLevel::Comfortable => 1,
            CrowdLevel::Moderate => 2,
            CrowdLevel::Busy => 3,
            CrowdLevel::Uncomfortable => 4,
            CrowdLevel::Critical => 5,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CrowdLevel::Comfortable => "Comfortable - Plenty of Space",
            CrowdLevel::Moderate => "Moderate Crowding",
            CrowdLevel::Busy => "Busy but Manageable",
            CrowdLevel::Uncomfortable => "Uncomfortable - Movement Restricted",
            CrowdLevel::Critical => "Critical Level - Unsafe Conditions",
        }
    }

    /// Traffic-light marker for display.
    pub fn symbol(self) -> &'static str {
        match self {
            CrowdLevel::Comfortable => "🟢",
            CrowdLevel::Moderate => "🟡",
            CrowdLevel::Busy => "🟠",
            CrowdLevel::Uncomfortable => "🔴",
            CrowdLevel::Critical => "⛔",
        }
    }
}

impl fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {} - {}", self.number(), self.description())
    }
}

/// Crowding at one station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationCrowd {
    pub station: StationName,
    pub density: f64,
    pub level: CrowdLevel,
}

impl StationCrowd {
    pub fn new(station: StationName, density: f64) -> Self {
        Self {
            station,
            density,
            level: CrowdLevel::from_density(density),
        }
    }
}

/// Crowding at every station of a route, in travel order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrowdReport {
    pub stations: Vec<StationCrowd>,
}

impl CrowdReport {
    /// Look up each station of `route` in `readings`.
    pub fn for_route(route: &Route, readings: &HashMap<String, f64>) -> Self {
        let stations = route
            .stations()
            .iter()
            .map(|name| {
                let density = readings
                    .get(name.as_str())
                    .copied()
                    .unwrap_or(DEFAULT_DENSITY);
                StationCrowd::new(name.clone(), density)
            })
            .collect();
        Self { stations }
    }

    /// The most crowded level anywhere on the route.
    pub fn worst(&self) -> CrowdLevel {
        self.stations
            .iter()
            .map(|s| s.level)
            .max()
            .unwrap_or(CrowdLevel::Comfortable)
    }
}
