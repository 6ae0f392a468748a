//! The `{ "status": ..., "data": ... }` envelope every WAQI endpoint returns.

use crate::error::WaqiError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

pub const STATUS_OK: &str = "ok";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub data: Value,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Unwrap `data` as `T` when `status` is "ok".
    ///
    /// Any other status becomes [`WaqiError::Api`] carrying `data` as the
    /// message, which is where WAQI puts its error text. An "ok" envelope
    /// with missing or null `data` is an error too.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, WaqiError> {
        if !self.is_ok() {
            let message = match self.data {
                Value::String(s) => s,
                Value::Null => self.status,
                other => other.to_string(),
            };
            return Err(WaqiError::Api(message));
        }
        if self.data.is_null() {
            return Err(WaqiError::Api("response has no data".to_string()));
        }
        Ok(serde_json::from_value(self.data)?)
    }

    pub fn parse(body: &str) -> Result<ApiResponse, WaqiError> {
        Ok(serde_json::from_str(body)?)
    }
}
