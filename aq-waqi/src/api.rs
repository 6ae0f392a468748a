use crate::{
    bounds::Bounds, error::WaqiError, reading::DetailedReading, station::StationId,
    station::StationRef,
};
use async_trait::async_trait;

/// The two WAQI calls the fetcher needs.
///
/// [`crate::WaqiClient`] implements this over HTTP; tests substitute an
/// in-memory fake.
#[async_trait]
pub trait WaqiApi: Send + Sync {
    /// List every station inside `bounds`, in the order the API returns them.
    async fn list_stations(&self, bounds: &Bounds) -> Result<Vec<StationRef>, WaqiError>;

    /// Fetch the current reading for one station.
    async fn station_feed(&self, uid: &StationId) -> Result<DetailedReading, WaqiError>;
}
