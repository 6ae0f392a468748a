use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// WAQI station identifier.
///
/// The API documents `uid` as an integer, but string identifiers show up in
/// the wild, so both are accepted and kept apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StationId {
    Number(i64),
    Text(String),
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationId::Number(n) => write!(f, "{}", n),
            StationId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for StationId {
    fn from(value: i64) -> Self {
        StationId::Number(value)
    }
}

impl From<&str> for StationId {
    fn from(value: &str) -> Self {
        StationId::Text(value.to_string())
    }
}

/// One entry of the `/v2/map/bounds` listing.
///
/// Only `uid` drives the fetch; the station name shows up in log lines.
/// Coordinates and the AQI snapshot are retained uninterpreted, everything
/// else lands in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRef {
    pub uid: StationId,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Either a number or a string such as "-" when the station is offline.
    #[serde(default)]
    pub aqi: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StationRef {
    pub fn new(uid: impl Into<StationId>) -> Self {
        StationRef {
            uid: uid.into(),
            lat: None,
            lon: None,
            aqi: None,
            extra: Map::new(),
        }
    }

    /// Human-readable station name from the listing, when present.
    pub fn name(&self) -> Option<&str> {
        self.extra
            .get("station")
            .and_then(|s| s.get("name"))
            .and_then(Value::as_str)
    }

    /// `uid` plus the station name when the listing has one, for log lines.
    pub fn label(&self) -> String {
        match self.name() {
            Some(name) => format!("{} ({})", self.uid, name),
            None => self.uid.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StationId, StationRef};

    // Trimmed from https://api.waqi.info/v2/map/bounds?latlng=-90,-180,90,180
    const LISTING: &str = r#"[
        {"lat":37.7749,"lon":-122.4194,"uid":3901,"aqi":"42","station":{"name":"San Francisco, California, USA","time":"2024-05-01T10:00:00+09:00"}},
        {"lat":51.5072,"lon":-0.1276,"uid":"A12345","aqi":"-","station":{"name":"London"}},
        {"uid":77}
    ]"#;

    #[test]
    fn test_parse_listing() {
        let stations: Vec<StationRef> = serde_json::from_str(LISTING).unwrap();
        assert_eq!(stations.len(), 3);
        assert_eq!(stations[0].uid, StationId::Number(3901));
        assert_eq!(stations[0].name(), Some("San Francisco, California, USA"));
        assert!((stations[0].lat.unwrap() - 37.7749).abs() < f64::EPSILON);
        assert_eq!(stations[1].uid, StationId::Text("A12345".to_string()));
        assert_eq!(stations[2].uid, StationId::Number(77));
        assert_eq!(stations[2].lat, None);
        assert_eq!(stations[2].name(), None);
        assert_eq!(stations[0].label(), "3901 (San Francisco, California, USA)");
        assert_eq!(stations[2].label(), "77");
    }

    #[test]
    fn test_numeric_and_text_ids_differ() {
        assert_ne!(StationId::Number(1), StationId::Text("1".to_string()));
        assert_eq!(StationId::Number(1).to_string(), "1");
        assert_eq!(StationId::from("@1").to_string(), "@1");
    }
}
