use metro_server::cache::RouteCache;
use metro_server::config::ServerConfig;
use metro_server::history::TripHistory;
use metro_server::logging::{LoggingConfig, init_logging};
use metro_server::network::hyderabad;
use metro_server::planner::PlannerConfig;
use metro_server::web::{AppState, create_router};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LoggingConfig::from_env())?;

    let config = ServerConfig::from_env()?;

    let network = hyderabad()?;
    info!(
        lines = network.lines().len(),
        stations = network.station_count(),
        connections = network.edge_count(),
        "Loaded metro network"
    );

    let state = AppState::new(
        network,
        PlannerConfig::default(),
        RouteCache::new(&config.cache),
        TripHistory::new(&config.data_dir),
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        data_dir = %config.data_dir.display(),
        "Metro route planner listening"
    );
    info!("  GET  /health         - Health check");
    info!("  GET  /api/stations   - Lines and stations");
    info!("  GET  /api/route      - Plan a route (?from=&to=)");
    info!("  GET  /api/fare       - Fare between stations (?from=&to=)");
    info!("  GET  /api/last-mile  - Last-mile quotes (?destination=&distance_km=)");
    info!("  POST /api/crowd      - Crowd levels along a route");
    info!("  POST /api/trips      - Record a trip");
    info!("  GET  /api/trips      - Trip history (?user=)");
    info!("  GET  /api/stats      - Travel stats (?user=)");

    axum::serve(listener, app).await?;
    Ok(())
}
