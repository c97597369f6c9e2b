use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, error, info, instrument};

use crate::db::{Station, TemperatureObservation, TemperatureStatsEntry};
use crate::services::{ObservationService, StationService};

#[derive(Clone)]
pub struct AppState {
    pub observation_service: ObservationService,
    pub station_service: StationService,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub fn create_router(state: AppState) -> Router {
    // Static segments win over the {start} capture, so the named routes are
    // never shadowed by the date-range ones.
    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/precipitation", get(precipitation))
        .route("/stations", get(stations))
        .route("/tobs", get(tobs))
        .route("/{start}", get(temperature_stats_from))
        .route("/{start}/{end}", get(temperature_stats_between))
        .with_state(state);

    Router::new()
        .route("/", get(home))
        .nest("/api/v1.0", api_routes)
}

async fn home() -> Html<&'static str> {
    Html(include_str!("../templates/home.html"))
}

#[instrument(skip(_state))]
async fn health(State(_state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

#[instrument(skip(state))]
async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, StatusCode> {
    debug!("Fetching precipitation for the trailing year");
    let readings = state
        .observation_service
        .precipitation_last_year()
        .await
        .map_err(|e| {
            error!("Failed to fetch trailing-year precipitation: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!("Retrieved precipitation for {} dates", readings.len());
    Ok(Json(readings))
}

#[instrument(skip(state))]
async fn stations(State(state): State<AppState>) -> Result<Json<Vec<Station>>, StatusCode> {
    debug!("Fetching station list");
    let stations = state.station_service.list_stations().await.map_err(|e| {
        error!("Failed to fetch stations: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!("Retrieved {} stations", stations.len());
    Ok(Json(stations))
}

#[instrument(skip(state))]
async fn tobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemperatureObservation>>, StatusCode> {
    debug!("Fetching temperature observations for the trailing year");
    let observations = state
        .observation_service
        .observations_last_year()
        .await
        .map_err(|e| {
            error!("Failed to fetch trailing-year observations: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!("Retrieved {} temperature observations", observations.len());
    Ok(Json(observations))
}

#[instrument(skip(state), fields(start = %start))]
async fn temperature_stats_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStatsEntry>>, StatusCode> {
    debug!("Fetching temperature stats from {} to end of data", start);
    let stats = state
        .observation_service
        .temperature_stats(&start, None)
        .await
        .map_err(|e| {
            error!("Failed to fetch temperature stats from {}: {}", start, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!("Computed temperature stats from {}", start);
    Ok(Json(stats))
}

#[instrument(skip(state), fields(start = %start, end = %end))]
async fn temperature_stats_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStatsEntry>>, StatusCode> {
    debug!("Fetching temperature stats from {} to {}", start, end);
    let stats = state
        .observation_service
        .temperature_stats(&start, Some(&end))
        .await
        .map_err(|e| {
            error!(
                "Failed to fetch temperature stats from {} to {}: {}",
                start, end, e
            );
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!("Computed temperature stats from {} to {}", start, end);
    Ok(Json(stats))
}
