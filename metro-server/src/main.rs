use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use metro_server::config::ServerConfig;
use metro_server::source::NetworkData;
use metro_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Load records and build the graph (fail fast on bad data)
    let data = match NetworkData::load(&config.stops_path, &config.edges_path) {
        Ok(data) => data,
        Err(e) => {
            error!(error = %e, "failed to load network data");
            return ExitCode::FAILURE;
        }
    };
    let state = match AppState::new(data, config.route.clone()) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build network graph");
            return ExitCode::FAILURE;
        }
    };
    info!(
        stops = state.graph.node_count(),
        edges = state.graph.edge_count(),
        "network ready"
    );

    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!("Metro route planner listening on http://{}", config.bind_addr);
    info!("  GET  /health   - Health check");
    info!("  GET  /data     - Raw stop and edge records");
    info!("  GET  /network  - Display view of the network");
    info!("  POST /route    - Fastest route between two stops");
    info!("  POST /pick     - Two-click stop selection");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
