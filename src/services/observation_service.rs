use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::db::{DbError, MeasurementRepository, TemperatureObservation, TemperatureStatsEntry};

/// Width of the trailing-year window in days. 366 so the window still spans
/// a full year when it crosses a leap day.
const TRAILING_YEAR_DAYS: i64 = 366;

#[derive(Clone)]
pub struct ObservationService {
    measurement_repo: MeasurementRepository,
}

impl ObservationService {
    pub fn new(measurement_repo: MeasurementRepository) -> Self {
        Self { measurement_repo }
    }

    /// Precipitation for the trailing year, keyed by date.
    ///
    /// When multiple rows share a date the later stored row wins; the result
    /// is a plain date -> precipitation mapping, not an aggregation. An empty
    /// store yields an empty mapping.
    pub async fn precipitation_last_year(
        &self,
    ) -> Result<BTreeMap<String, Option<f64>>, DbError> {
        let Some(last_date) = self.measurement_repo.find_last_date().await? else {
            return Ok(BTreeMap::new());
        };
        let begin_date = Self::trailing_year_start(&last_date)?;

        let readings = self
            .measurement_repo
            .find_precipitation_since(&begin_date)
            .await?;

        let mut by_date = BTreeMap::new();
        for reading in readings {
            by_date.insert(reading.date, reading.prcp);
        }

        Ok(by_date)
    }

    /// Temperature observations for the trailing year, one record per stored
    /// row, in storage order.
    pub async fn observations_last_year(&self) -> Result<Vec<TemperatureObservation>, DbError> {
        let Some(last_date) = self.measurement_repo.find_last_date().await? else {
            return Ok(Vec::new());
        };
        let begin_date = Self::trailing_year_start(&last_date)?;

        self.measurement_repo
            .find_observations_since(&begin_date)
            .await
    }

    /// TMIN/TAVG/TMAX over an inclusive date range.
    ///
    /// A missing end date resolves to the latest date in the store (or the
    /// start date itself when the store is empty, which keeps the range
    /// well-formed and the aggregates null). An empty filtered set yields
    /// null temperatures rather than an error, so repeated calls with an
    /// out-of-range start are idempotent.
    pub async fn temperature_stats(
        &self,
        start_date: &str,
        end_date: Option<&str>,
    ) -> Result<Vec<TemperatureStatsEntry>, DbError> {
        let end_date = match end_date {
            Some(end) => end.to_string(),
            None => self
                .measurement_repo
                .find_last_date()
                .await?
                .unwrap_or_else(|| start_date.to_string()),
        };

        let aggregates = self
            .measurement_repo
            .temperature_aggregates(start_date, &end_date)
            .await?;

        Ok(vec![
            TemperatureStatsEntry::Window {
                start_date: start_date.to_string(),
                end_date,
            },
            TemperatureStatsEntry::Aggregate {
                tobs: "TMIN",
                temperature: aggregates.tmin,
            },
            TemperatureStatsEntry::Aggregate {
                tobs: "TAVG",
                temperature: aggregates.tavg,
            },
            TemperatureStatsEntry::Aggregate {
                tobs: "TMAX",
                temperature: aggregates.tmax,
            },
        ])
    }

    /// First date of the trailing-year window ending at `last_date`.
    ///
    /// The subtraction is calendar arithmetic on the parsed date; the result
    /// is reformatted to `YYYY-MM-DD` so the range filters stay lexical.
    pub fn trailing_year_start(last_date: &str) -> Result<String, DbError> {
        let last = NaiveDate::parse_from_str(last_date, "%Y-%m-%d")?;
        let begin = last - Duration::days(TRAILING_YEAR_DAYS);
        Ok(begin.format("%Y-%m-%d").to_string())
    }
}
