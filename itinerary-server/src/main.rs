use itinerary_server::config::ServerConfig;
use itinerary_server::digitransit::{DigitransitClient, MockTransitClient};
use itinerary_server::planner::{RouteLookup, TransitApi};
use itinerary_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    match &config.mock_fixture {
        Some(path) => {
            let client = MockTransitClient::from_file(path).expect("Failed to load mock fixture");
            info!(fixture = %path.display(), "serving from mock fixture");
            serve(client, &config).await;
        }
        None => {
            let client = DigitransitClient::new(config.digitransit.clone())
                .expect("Failed to create Digitransit client");
            info!(endpoint = %config.digitransit.base_url, "using Digitransit API");
            serve(client, &config).await;
        }
    }
}

async fn serve<C>(client: C, config: &ServerConfig)
where
    C: TransitApi + Send + Sync + 'static,
{
    let lookup = RouteLookup::new(client, config.lookup.clone());
    info!(
        utc_offset_hours = lookup.config().utc_offset_hours,
        modes = ?lookup.config().modes,
        "route lookup configured"
    );

    let app = create_router(AppState::new(lookup));

    let addr = config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    info!("Itinerary server listening on http://{addr}");
    info!("  GET /health");
    info!("  GET /routes?start=<place>&stop=<place>&time=<yyyymmddHHMMSS>");

    axum::serve(listener, app).await.expect("Server error");
}
