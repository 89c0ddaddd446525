//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{debug, error, info};

use crate::crowd::CrowdReport;
use crate::history::{HistoryError, LastMileLeg, TravelStats, TripRecord};
use crate::last_mile::{self, TransportOption};
use crate::network::NetworkError;
use crate::planner::RouteError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/route", get(plan_route))
        .route("/api/fare", get(fare))
        .route("/api/last-mile", get(last_mile_quote))
        .route("/api/crowd", post(crowd_levels))
        .route("/api/trips", get(trip_history).post(record_trip))
        .route("/api/stats", get(travel_stats))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All lines and their stations.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let lines = state
        .network
        .lines()
        .iter()
        .map(|line| LineResult::from_line(line, &state.network))
        .collect();

    Json(StationsResponse { lines })
}

/// Plan the route between two stations.
async fn plan_route(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let planner = state.planner();
    let plan = state
        .cache
        .get_or_plan(&planner, req.from.trim(), req.to.trim())
        .await?;

    Ok(Json(RouteResponse::from_plan(&plan, &state.network)))
}

/// Fare between two stations; the flat fallback fare if no route exists.
async fn fare(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<FareResponse>, AppError> {
    let from = req.from.trim();
    let to = req.to.trim();
    let fare = state.planner().calculate_fare_between(from, to)?;

    Ok(Json(FareResponse {
        from: from.to_string(),
        to: to.to_string(),
        fare: fare.amount(),
    }))
}

/// Longest last-mile leg accepted, in km.
const MAX_LAST_MILE_KM: f64 = 1000.0;

fn check_distance(distance_km: f64) -> Result<(), AppError> {
    if distance_km.is_finite() && distance_km > 0.0 && distance_km <= MAX_LAST_MILE_KM {
        Ok(())
    } else {
        Err(AppError::BadRequest {
            message: format!(
                "distance must be between 0 and {MAX_LAST_MILE_KM} km: {distance_km}"
            ),
        })
    }
}

fn check_destination(destination: &str) -> Result<&str, AppError> {
    let destination = destination.trim();
    if destination.is_empty() {
        return Err(AppError::BadRequest {
            message: "destination cannot be empty".to_string(),
        });
    }
    Ok(destination)
}

/// Quote every last-mile mode, cheapest first.
async fn last_mile_quote(
    Query(req): Query<LastMileRequest>,
) -> Result<Json<LastMileResponse>, AppError> {
    let destination = check_destination(&req.destination)?;
    check_distance(req.distance_km)?;
    let peak = req.peak.unwrap_or_else(last_mile::is_peak_now);

    let quote = last_mile::quote(destination, req.distance_km, peak);
    Ok(Json(LastMileResponse::from_quote(&quote)))
}

/// Crowd level at each station of the route between two stations.
async fn crowd_levels(
    State(state): State<AppState>,
    Json(req): Json<CrowdRequest>,
) -> Result<Json<CrowdResponse>, AppError> {
    if let Some((station, density)) = req
        .densities
        .iter()
        .find(|(_, d)| !d.is_finite() || **d < 0.0)
    {
        return Err(AppError::BadRequest {
            message: format!("density for {station} must be a non-negative number: {density}"),
        });
    }

    let planner = state.planner();
    let plan = state
        .cache
        .get_or_plan(&planner, req.from.trim(), req.to.trim())
        .await?;

    let report = CrowdReport::for_route(&plan.route, &req.densities);
    Ok(Json(CrowdResponse::from_report(&report)))
}

/// Record a completed trip in the user's history and stats.
async fn record_trip(
    State(state): State<AppState>,
    Json(req): Json<RecordTripRequest>,
) -> Result<Json<RecordTripResponse>, AppError> {
    let onward = req
        .last_mile
        .map(|choice| -> Result<LastMileLeg, AppError> {
            let destination = check_destination(&choice.destination)?.to_string();
            check_distance(choice.distance_km)?;
            let peak = choice.peak.unwrap_or_else(last_mile::is_peak_now);
            Ok(LastMileLeg {
                destination,
                option: TransportOption::new(choice.mode, choice.distance_km, peak),
            })
        })
        .transpose()?;

    let planner = state.planner();
    let plan = state
        .cache
        .get_or_plan(&planner, req.from.trim(), req.to.trim())
        .await?;
    let trip = TripRecord::new(plan.route.clone(), plan.fare, onward);

    let history = state.history.clone();
    let user = req.user;
    let (trip, stats) = run_blocking(move || {
        let stats = history.record(user.as_deref(), &trip)?;
        Ok((trip, stats))
    })
    .await?;

    info!(
        route = %trip.route,
        total_fare = %trip.total_fare(),
        total_trips = stats.total_trips,
        "Trip recorded"
    );

    Ok(Json(RecordTripResponse::from_trip(&trip, stats)))
}

/// The user's trip log as plain text.
async fn trip_history(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<String, AppError> {
    let history = state.history.clone();
    let user = query.user;
    run_blocking(move || history.read(user.as_deref()))
        .await?
        .ok_or_else(|| AppError::NotFound {
            message: "no trip history yet".to_string(),
        })
}

/// The user's cumulative travel stats.
async fn travel_stats(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<TravelStats>, AppError> {
    let history = state.history.clone();
    let stats = run_blocking(move || history.stats(query.user.as_deref())).await?;
    Ok(Json(stats))
}

/// Run file IO on the blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, HistoryError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal {
            message: format!("history task failed: {e}"),
        })?
        .map_err(AppError::from)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let message = e.to_string();
        match e {
            RouteError::SameStation(_) => AppError::BadRequest { message },
            RouteError::UnknownStation(_)
            | RouteError::NoRoute { .. }
            | RouteError::Network(NetworkError::UnknownStation(_)) => AppError::NotFound { message },
            RouteError::Network(_) | RouteError::Domain(_) => AppError::Internal { message },
        }
    }
}

impl From<HistoryError> for AppError {
    fn from(e: HistoryError) -> Self {
        let message = e.to_string();
        if e.is_invalid_input() {
            AppError::BadRequest { message }
        } else {
            AppError::Internal { message }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            debug!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
