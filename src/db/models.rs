use serde::Serialize;
use sqlx::FromRow;

// Database entity models
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// One day's precipitation reading at a station.
///
/// `prcp` is nullable in the store; a missing reading is distinct from a
/// reading of zero.
#[derive(Debug, Clone, FromRow)]
pub struct PrecipitationReading {
    pub date: String,
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TemperatureObservation {
    pub date: String,
    pub station: String,
    pub tobs: f64,
}

/// MIN/AVG/MAX of observed temperature over a date range.
///
/// All three fields are None when the range matched no rows.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct TemperatureAggregates {
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

// API response DTOs (to avoid circular dependency between services and api modules)
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TemperatureStatsEntry {
    Window {
        start_date: String,
        end_date: String,
    },
    Aggregate {
        tobs: &'static str,
        #[serde(rename = "Temperature")]
        temperature: Option<f64>,
    },
}
