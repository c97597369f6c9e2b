use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tempfile::NamedTempFile;

/// A throwaway SQLite database backing a single test.
///
/// The tempfile handle keeps the database file on disk for the pool's
/// lifetime; dropping the struct removes it.
pub struct TestDb {
    pub pool: SqlitePool,
    _file: NamedTempFile,
}

/// Create a fresh database file with the station and measurement tables.
///
/// Each test gets its own file, so tests can run in parallel without
/// sharing state.
pub async fn setup_test_db() -> TestDb {
    let file = NamedTempFile::new().expect("Failed to create temp database file");
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", file.path().display()))
        .expect("Failed to parse database options")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("Failed to connect to test database");

    create_schema(&pool).await;

    TestDb { pool, _file: file }
}

async fn create_schema(pool: &SqlitePool) {
    sqlx::query(
        r#"
        CREATE TABLE station (
            id        INTEGER PRIMARY KEY,
            station   TEXT NOT NULL,
            name      TEXT NOT NULL,
            latitude  REAL NOT NULL,
            longitude REAL NOT NULL,
            elevation REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("Failed to create station table");

    sqlx::query(
        r#"
        CREATE TABLE measurement (
            id      INTEGER PRIMARY KEY,
            station TEXT NOT NULL,
            date    TEXT NOT NULL,
            prcp    REAL,
            tobs    REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("Failed to create measurement table");
}

#[allow(dead_code)]
pub async fn insert_station(
    pool: &SqlitePool,
    station: &str,
    name: &str,
    latitude: f64,
    longitude: f64,
    elevation: f64,
) {
    sqlx::query(
        "INSERT INTO station (station, name, latitude, longitude, elevation) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(station)
    .bind(name)
    .bind(latitude)
    .bind(longitude)
    .bind(elevation)
    .execute(pool)
    .await
    .expect("Failed to insert station");
}

#[allow(dead_code)]
pub async fn insert_measurement(
    pool: &SqlitePool,
    station: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: f64,
) {
    sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
        .bind(station)
        .bind(date)
        .bind(prcp)
        .bind(tobs)
        .execute(pool)
        .await
        .expect("Failed to insert measurement");
}
