use thiserror::Error;

/// Errors that can occur when talking to the WAQI API.
///
/// Messages never include request URLs, which carry the access token.
#[derive(Debug, Error)]
pub enum WaqiError {
    /// The request could not be sent or its body could not be read.
    #[cfg(feature = "api")]
    #[error("request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The server answered with something other than HTTP 200.
    #[error("HTTP {0}")]
    Status(u16),

    /// The body was valid JSON but its `status` was not "ok".
    #[error("API returned error status: {0}")]
    Api(String),

    /// The body was not the expected JSON envelope.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid bounds: {0}")]
    InvalidBounds(String),
}

#[cfg(feature = "api")]
impl From<reqwest::Error> for WaqiError {
    fn from(err: reqwest::Error) -> Self {
        WaqiError::Http(err.without_url())
    }
}

#[cfg(test)]
mod tests {
    use super::WaqiError;

    #[test]
    fn test_display() {
        assert_eq!(WaqiError::Status(500).to_string(), "HTTP 500");
        assert_eq!(
            WaqiError::Api("Invalid key".to_string()).to_string(),
            "API returned error status: Invalid key"
        );
    }

    #[test]
    fn test_decode_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let waqi: WaqiError = err.into();
        assert!(matches!(waqi, WaqiError::Decode(_)));
    }
}
