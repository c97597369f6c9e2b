pub mod observation_service;
pub mod station_service;

pub use observation_service::ObservationService;
pub use station_service::StationService;
