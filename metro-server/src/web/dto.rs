//! Data transfer objects for web requests and responses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::carbon::{self, CarbonFootprint};
use crate::crowd::{CrowdReport, StationCrowd};
use crate::domain::{LineId, StationKind};
use crate::history::{TravelStats, TripRecord};
use crate::last_mile::{LastMileQuote, TransportMode, TransportOption};
use crate::network::{Line, Network};
use crate::planner::{RideLeg, RoutePlan};

/// Request naming two stations.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub from: String,
    pub to: String,
}

/// Every line with its stations in travel order.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub lines: Vec<LineResult>,
}

#[derive(Debug, Serialize)]
pub struct LineResult {
    pub id: u16,
    pub name: String,
    pub stations: Vec<StationResult>,
}

#[derive(Debug, Serialize)]
pub struct StationResult {
    pub name: String,
    pub kind: StationKind,
    /// Ids of every line serving the station.
    pub lines: Vec<u16>,
}

impl LineResult {
    pub fn from_line(line: &Line, network: &Network) -> Self {
        let stations = line
            .stations()
            .iter()
            .filter_map(|name| network.station(name.as_str()).ok())
            .map(|station| StationResult {
                name: station.name().to_string(),
                kind: station.kind(),
                lines: station.lines().map(LineId::get).collect(),
            })
            .collect();

        Self {
            id: line.id().get(),
            name: line.name().to_string(),
            stations,
        }
    }
}

/// A planned route.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub stations: Vec<String>,
    pub fare: f64,
    pub duration_mins: u32,
    pub transfers: usize,
    /// Stations where the passenger changes line
    pub interchanges: Vec<String>,
    pub legs: Vec<LegResult>,
    pub distance_km: f64,
    pub co2_saved_kg: f64,
    /// CO₂ saved, formatted for display (e.g. "360.00 g")
    pub co2_saved: String,
}

/// A stretch ridden on one line.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub line: u16,
    pub line_name: String,
    pub board: String,
    pub alight: String,
    pub stops: usize,
}

impl LegResult {
    pub fn from_leg(leg: &RideLeg, network: &Network) -> Self {
        let line_name = network
            .line(leg.line)
            .map(|line| line.name().to_string())
            .unwrap_or_else(|| leg.line.to_string());

        Self {
            line: leg.line.get(),
            line_name,
            board: leg.board.to_string(),
            alight: leg.alight.to_string(),
            stops: leg.hops,
        }
    }
}

impl RouteResponse {
    pub fn from_plan(plan: &RoutePlan, network: &Network) -> Self {
        let footprint = CarbonFootprint::for_route(&plan.route);

        Self {
            stations: plan.route.stations().iter().map(|s| s.to_string()).collect(),
            fare: plan.fare.amount(),
            duration_mins: plan.duration_mins,
            transfers: plan.transfers,
            interchanges: plan.interchanges().map(|s| s.to_string()).collect(),
            legs: plan
                .legs
                .iter()
                .map(|leg| LegResult::from_leg(leg, network))
                .collect(),
            distance_km: footprint.distance_km,
            co2_saved_kg: footprint.co2_saved_kg,
            co2_saved: carbon::format_co2(footprint.co2_saved_kg),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FareResponse {
    pub from: String,
    pub to: String,
    pub fare: f64,
}

/// Request for last-mile quotes.
#[derive(Debug, Deserialize)]
pub struct LastMileRequest {
    pub destination: String,
    pub distance_km: f64,
    /// Defaults to the current local time
    pub peak: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct LastMileResponse {
    pub destination: String,
    pub distance_km: f64,
    pub peak: bool,
    /// Cheapest first
    pub options: Vec<TransportOptionResult>,
}

#[derive(Debug, Serialize)]
pub struct TransportOptionResult {
    pub mode: TransportMode,
    pub name: String,
    pub fare: f64,
    pub estimated_minutes: u32,
}

impl TransportOptionResult {
    pub fn from_option(option: &TransportOption) -> Self {
        Self {
            mode: option.mode,
            name: option.mode.display_name().to_string(),
            fare: option.fare.amount(),
            estimated_minutes: option.estimated_minutes,
        }
    }
}

impl LastMileResponse {
    pub fn from_quote(quote: &LastMileQuote) -> Self {
        Self {
            destination: quote.destination.clone(),
            distance_km: quote.distance_km,
            peak: quote.peak,
            options: quote
                .options
                .iter()
                .map(TransportOptionResult::from_option)
                .collect(),
        }
    }
}

/// Request to record a completed trip.
#[derive(Debug, Deserialize)]
pub struct RecordTripRequest {
    pub from: String,
    pub to: String,
    pub user: Option<String>,
    pub last_mile: Option<LastMileChoice>,
}

/// The last-mile option the passenger took.
#[derive(Debug, Deserialize)]
pub struct LastMileChoice {
    pub mode: TransportMode,
    pub destination: String,
    pub distance_km: f64,
    /// Defaults to the current local time
    pub peak: Option<bool>,
}

/// What was recorded, with the user's updated totals.
#[derive(Debug, Serialize)]
pub struct RecordTripResponse {
    pub stations: Vec<String>,
    pub metro_fare: f64,
    pub last_mile: Option<RecordedLastMile>,
    pub total_distance_km: f64,
    pub total_fare: f64,
    pub co2_saved_kg: f64,
    pub stats: TravelStats,
}

#[derive(Debug, Serialize)]
pub struct RecordedLastMile {
    pub destination: String,
    #[serde(flatten)]
    pub option: TransportOptionResult,
}

impl RecordTripResponse {
    pub fn from_trip(trip: &TripRecord, stats: TravelStats) -> Self {
        Self {
            stations: trip.route.stations().iter().map(|s| s.to_string()).collect(),
            metro_fare: trip.metro_fare.amount(),
            last_mile: trip.last_mile.as_ref().map(|leg| RecordedLastMile {
                destination: leg.destination.clone(),
                option: TransportOptionResult::from_option(&leg.option),
            }),
            total_distance_km: trip.total_distance_km(),
            total_fare: trip.total_fare().amount(),
            co2_saved_kg: trip.co2_saved_kg(),
            stats,
        }
    }
}

/// Density readings, in persons/m², for a planned route.
#[derive(Debug, Deserialize)]
pub struct CrowdRequest {
    pub from: String,
    pub to: String,
    /// Keyed by station name; stations without a reading use the default
    #[serde(default)]
    pub densities: HashMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct CrowdResponse {
    pub stations: Vec<StationCrowdResult>,
    pub worst_level: u8,
    pub worst_status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StationCrowdResult {
    pub station: String,
    pub density: f64,
    pub level: u8,
    pub status: &'static str,
    pub symbol: &'static str,
}

impl StationCrowdResult {
    pub fn from_crowd(crowd: &StationCrowd) -> Self {
        Self {
            station: crowd.station.to_string(),
            density: crowd.density,
            level: crowd.level.number(),
            status: crowd.level.description(),
            symbol: crowd.level.symbol(),
        }
    }
}

impl CrowdResponse {
    pub fn from_report(report: &CrowdReport) -> Self {
        let worst = report.worst();
        Self {
            stations: report
                .stations
                .iter()
                .map(StationCrowdResult::from_crowd)
                .collect(),
            worst_level: worst.number(),
            worst_status: worst.description(),
        }
    }
}

/// Selects a user's history; absent or blank means the shared history.
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub user: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
