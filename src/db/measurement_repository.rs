use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::db::{DbError, PrecipitationReading, TemperatureAggregates, TemperatureObservation};

#[derive(Clone)]
pub struct MeasurementRepository {
    pool: SqlitePool,
}

impl MeasurementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Latest observation date in the store, as a `YYYY-MM-DD` string.
    ///
    /// Dates are zero-padded ISO strings, so the SQL MAX() over the text
    /// column agrees with chronological order.
    #[instrument(skip(self))]
    pub async fn find_last_date(&self) -> Result<Option<String>, DbError> {
        debug!("Querying for latest measurement date");

        let last_date =
            sqlx::query_scalar::<_, Option<String>>("SELECT MAX(date) FROM measurement")
                .fetch_one(&self.pool)
                .await?;

        if last_date.is_none() {
            debug!("No measurements found in database");
        }

        Ok(last_date)
    }

    /// All precipitation readings on or after `begin_date`, in storage order.
    #[instrument(skip(self))]
    pub async fn find_precipitation_since(
        &self,
        begin_date: &str,
    ) -> Result<Vec<PrecipitationReading>, DbError> {
        debug!("Querying precipitation readings since {}", begin_date);

        let readings = sqlx::query_as::<_, PrecipitationReading>(
            "SELECT date, prcp FROM measurement WHERE date >= ?",
        )
        .bind(begin_date)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} precipitation readings", readings.len());
        Ok(readings)
    }

    /// All temperature observations on or after `begin_date`, in storage
    /// order, unaggregated. Duplicate dates yield one record per row.
    #[instrument(skip(self))]
    pub async fn find_observations_since(
        &self,
        begin_date: &str,
    ) -> Result<Vec<TemperatureObservation>, DbError> {
        debug!("Querying temperature observations since {}", begin_date);

        let observations = sqlx::query_as::<_, TemperatureObservation>(
            "SELECT date, station, tobs FROM measurement WHERE date >= ?",
        )
        .bind(begin_date)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} temperature observations", observations.len());
        Ok(observations)
    }

    /// MIN/AVG/MAX of observed temperature over an inclusive date range.
    ///
    /// Both bounds are compared lexically against the stored date strings.
    /// An empty range returns a row of NULL aggregates rather than an error.
    #[instrument(skip(self))]
    pub async fn temperature_aggregates(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<TemperatureAggregates, DbError> {
        debug!(
            "Querying temperature aggregates from {} to {}",
            start_date, end_date
        );

        let aggregates = sqlx::query_as::<_, TemperatureAggregates>(
            "SELECT MIN(tobs) AS tmin, AVG(tobs) AS tavg, MAX(tobs) AS tmax \
             FROM measurement WHERE date >= ? AND date <= ?",
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(aggregates)
    }
}
