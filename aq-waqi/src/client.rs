//! HTTP client for the WAQI JSON API.
//!
//! - `/v2/map/bounds?token=<TOKEN>&latlng=<minLat>,<minLon>,<maxLat>,<maxLon>`
//!   lists stations in a box.
//! - `/feed/@<uid>/?token=<TOKEN>` returns the current reading for a station.
//!
//! Both answer `{"status": "ok" | ..., "data": ...}`. See <https://aqicn.org/json-api/doc/>.

use crate::{
    api::WaqiApi, bounds::Bounds, error::WaqiError, reading::DetailedReading,
    response::ApiResponse, station::StationId, station::StationRef,
};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://api.waqi.info";

/// Name of the environment variable holding the access token.
pub const TOKEN_ENV_VAR: &str = "WAQI_API_TOKEN";

pub struct WaqiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl WaqiClient {
    pub fn new(token: impl Into<String>) -> Self {
        WaqiClient {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
        }
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bounds_url(&self, bounds: &Bounds) -> String {
        format!(
            "{}/v2/map/bounds?token={}&latlng={}",
            self.base_url, self.token, bounds
        )
    }

    fn feed_url(&self, uid: &StationId) -> String {
        format!("{}/feed/@{}/?token={}", self.base_url, uid, self.token)
    }

    async fn get_envelope(&self, url: &str) -> Result<ApiResponse, WaqiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(WaqiError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        debug!("Received {} bytes", body.len());
        ApiResponse::parse(&body)
    }
}

impl fmt::Debug for WaqiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaqiClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl WaqiApi for WaqiClient {
    async fn list_stations(&self, bounds: &Bounds) -> Result<Vec<StationRef>, WaqiError> {
        self.get_envelope(&self.bounds_url(bounds))
            .await?
            .into_data()
    }

    async fn station_feed(&self, uid: &StationId) -> Result<DetailedReading, WaqiError> {
        self.get_envelope(&self.feed_url(uid)).await?.into_data()
    }
}
