use crate::db::{DbError, Station, StationRepository};

#[derive(Clone)]
pub struct StationService {
    station_repo: StationRepository,
}

impl StationService {
    pub fn new(station_repo: StationRepository) -> Self {
        Self { station_repo }
    }

    /// All stations, in natural storage order.
    pub async fn list_stations(&self) -> Result<Vec<Station>, DbError> {
        self.station_repo.find_all().await
    }

    pub async fn station_count(&self) -> Result<usize, DbError> {
        self.station_repo.count().await
    }
}
