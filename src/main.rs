use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use climate_archive_service::api::{create_router, AppState};
use climate_archive_service::config::Config;
use climate_archive_service::db::{MeasurementRepository, StationRepository};
use climate_archive_service::services::{ObservationService, StationService};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,climate_archive_service=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;
    info!("Starting climate archive service with config: {:?}", config);

    // Open the observation store. The store is externally owned and this
    // service only ever reads from it.
    info!("Connecting to database...");
    let options = SqliteConnectOptions::from_str(&config.database_url)?.read_only(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    info!("Database connection established");

    // Create repositories
    let measurement_repo = MeasurementRepository::new(pool.clone());
    let station_repo = StationRepository::new(pool.clone());

    // Create services
    let observation_service = ObservationService::new(measurement_repo);
    let station_service = StationService::new(station_repo);

    // Create API router
    let app_state = AppState {
        observation_service,
        station_service,
    };
    let app = create_router(app_state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
