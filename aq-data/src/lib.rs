//! Classification and summaries of collected air quality readings.
//!
//! The fetcher never looks inside a reading. This crate is for consumers of
//! the output document that want the handful of fields the site displays.

/// AQI and PM2.5 thresholds.
pub mod classification {
    use serde::Serialize;
    use std::fmt;

    /// Coarse status shown next to each station.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
    pub enum Status {
        Good,
        SoSo,
        Bad,
    }

    impl Status {
        /// `<= 100` Good, `<= 150` So-so, otherwise Bad.
        pub fn from_aqi(aqi: f64) -> Status {
            if aqi <= 100.0 {
                Status::Good
            } else if aqi <= 150.0 {
                Status::SoSo
            } else {
                Status::Bad
            }
        }

        /// PM2.5 in µg/m³: `< 12` Good, `< 35` So-so, otherwise Bad.
        pub fn from_pm25(pm25: f64) -> Status {
            if pm25 < 12.0 {
                Status::Good
            } else if pm25 < 35.0 {
                Status::SoSo
            } else {
                Status::Bad
            }
        }
    }

    impl fmt::Display for Status {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let s = match self {
                Status::Good => "Good",
                Status::SoSo => "So-so",
                Status::Bad => "Bad",
            };
            write!(f, "{}", s)
        }
    }

    /// The worse of the AQI and PM2.5 statuses. A missing PM2.5 counts as Good.
    pub fn overall_status(aqi: f64, pm25: Option<f64>) -> Status {
        let pm25_status = pm25.map(Status::from_pm25).unwrap_or(Status::Good);
        Status::from_aqi(aqi).max(pm25_status)
    }

    /// The six US EPA outdoor AQI categories.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
    pub enum AqiCategory {
        Good,
        Moderate,
        UnhealthyForSensitive,
        Unhealthy,
        VeryUnhealthy,
        Hazardous,
    }

    impl AqiCategory {
        pub fn from_aqi(aqi: f64) -> AqiCategory {
            match aqi {
                a if a <= 50.0 => AqiCategory::Good,
                a if a <= 100.0 => AqiCategory::Moderate,
                a if a <= 150.0 => AqiCategory::UnhealthyForSensitive,
                a if a <= 200.0 => AqiCategory::Unhealthy,
                a if a <= 300.0 => AqiCategory::VeryUnhealthy,
                _ => AqiCategory::Hazardous,
            }
        }
    }

    impl fmt::Display for AqiCategory {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let s = match self {
                AqiCategory::Good => "Good",
                AqiCategory::Moderate => "Moderate",
                AqiCategory::UnhealthyForSensitive => "Unhealthy for Sensitive Groups",
                AqiCategory::Unhealthy => "Unhealthy",
                AqiCategory::VeryUnhealthy => "Very Unhealthy",
                AqiCategory::Hazardous => "Hazardous",
            };
            write!(f, "{}", s)
        }
    }

}

/// Read-only access to the fields of a WAQI reading.
pub mod view {
    use aq_waqi::DetailedReading;
    use chrono::NaiveDateTime;
    use serde_json::Value;

    /// Local time format of `time.s` in a feed reading.
    pub const OBSERVATION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Pollutant keys the site shows as columns, in display order.
    pub const POLLUTANTS: [&str; 6] = ["pm25", "pm10", "o3", "no2", "so2", "co"];

    /// City, region and country split out of a station name such as
    /// "Oakland, California, USA".
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct Location {
        pub city: String,
        pub region: String,
        pub country: String,
    }

    impl Location {
        pub fn from_station_name(name: &str) -> Location {
            let parts: Vec<&str> = name.split(',').map(str::trim).collect();
            Location {
                city: parts.first().copied().unwrap_or_default().to_string(),
                region: parts.get(1).copied().unwrap_or_default().to_string(),
                country: parts.last().copied().unwrap_or_default().to_string(),
            }
        }
    }

    #[derive(Debug, Clone, Copy)]
    pub struct ReadingView<'a> {
        value: &'a Value,
    }

    impl<'a> ReadingView<'a> {
        pub fn new(reading: &'a DetailedReading) -> Self {
            ReadingView {
                value: reading.as_value(),
            }
        }

        pub fn idx(&self) -> Option<i64> {
            self.value.get("idx").and_then(Value::as_i64)
        }

        /// WAQI sends "-" for stations without a current AQI.
        pub fn aqi(&self) -> Option<f64> {
            match self.value.get("aqi")? {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }
        }

        pub fn city_name(&self) -> Option<&'a str> {
            self.value.pointer("/city/name").and_then(Value::as_str)
        }

        pub fn location(&self) -> Option<Location> {
            self.city_name().map(Location::from_station_name)
        }

        /// Individual AQI for one pollutant, e.g. `pollutant("pm25")`.
        pub fn pollutant(&self, key: &str) -> Option<f64> {
            self.value
                .get("iaqi")
                .and_then(|iaqi| iaqi.get(key))
                .and_then(|p| p.get("v"))
                .and_then(Value::as_f64)
        }

        pub fn pm25(&self) -> Option<f64> {
            self.pollutant("pm25")
        }

        pub fn observed_at(&self) -> Option<NaiveDateTime> {
            let s = self.value.pointer("/time/s").and_then(Value::as_str)?;
            NaiveDateTime::parse_from_str(s, OBSERVATION_TIME_FORMAT).ok()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serde_json::json;

        fn reading() -> DetailedReading {
            DetailedReading(json!({
                "aqi": 57,
                "idx": 3901,
                "city": {"geo": [37.77, -122.41], "name": "San Francisco, California, USA", "url": "https://aqicn.org/city/usa/california/san-francisco"},
                "iaqi": {"pm25": {"v": 57}, "o3": {"v": 21.4}},
                "time": {"s": "2024-05-01 10:00:00", "tz": "-07:00"}
            }))
        }

        #[test]
        fn test_fields() {
            let reading = reading();
            let view = ReadingView::new(&reading);
            assert_eq!(view.idx(), Some(3901));
            assert_eq!(view.aqi(), Some(57.0));
            assert_eq!(view.pm25(), Some(57.0));
            assert_eq!(view.pollutant("o3"), Some(21.4));
            assert_eq!(view.pollutant("so2"), None);
            assert_eq!(
                view.observed_at().unwrap().to_string(),
                "2024-05-01 10:00:00"
            );
            let location = view.location().unwrap();
            assert_eq!(location.city, "San Francisco");
            assert_eq!(location.region, "California");
            assert_eq!(location.country, "USA");
        }

        #[test]
        fn test_missing_and_string_aqi() {
            let dash = DetailedReading(json!({"aqi": "-"}));
            assert_eq!(ReadingView::new(&dash).aqi(), None);
            let text = DetailedReading(json!({"aqi": "88"}));
            assert_eq!(ReadingView::new(&text).aqi(), Some(88.0));
            let empty = DetailedReading(json!(null));
            assert_eq!(ReadingView::new(&empty).aqi(), None);
            assert_eq!(ReadingView::new(&empty).city_name(), None);
        }

        #[test]
        fn test_single_part_location() {
            let location = Location::from_station_name("Beijing");
            assert_eq!(location.city, "Beijing");
            assert_eq!(location.region, "");
            assert_eq!(location.country, "Beijing");
        }
    }
}

/// Aggregate statistics over an output document.
pub mod summary {
    use crate::classification::{overall_status, AqiCategory, Status};
    use crate::view::{ReadingView, POLLUTANTS};
    use aq_waqi::DetailedReading;
    use chrono::NaiveDateTime;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct RankedStation {
        pub idx: Option<i64>,
        pub name: String,
        pub country: Option<String>,
        pub aqi: f64,
        pub status: Status,
        /// Individual AQI per pollutant the station reports, in `POLLUTANTS` order.
        pub pollutants: Vec<(&'static str, f64)>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Summary {
        pub total: usize,
        pub without_aqi: usize,
        pub by_status: BTreeMap<Status, usize>,
        pub by_category: BTreeMap<AqiCategory, usize>,
        pub newest_observation: Option<NaiveDateTime>,
        /// Highest AQI first.
        pub worst: Vec<RankedStation>,
    }

    impl Summary {
        /// Summarize `readings`, optionally restricted to stations whose name
        /// contains `filter` (case-insensitive), keeping the `top` worst.
        pub fn from_readings(
            readings: &[DetailedReading],
            filter: Option<&str>,
            top: usize,
        ) -> Summary {
            let needle = filter.map(str::to_lowercase);
            let mut summary = Summary {
                total: 0,
                without_aqi: 0,
                by_status: BTreeMap::new(),
                by_category: BTreeMap::new(),
                newest_observation: None,
                worst: Vec::new(),
            };
            let mut ranked = Vec::new();

            for reading in readings {
                let view = ReadingView::new(reading);
                if let Some(needle) = &needle {
                    let matches = view
                        .city_name()
                        .map(|name| name.to_lowercase().contains(needle.as_str()))
                        .unwrap_or(false);
                    if !matches {
                        continue;
                    }
                }
                summary.total += 1;

                if let Some(observed) = view.observed_at() {
                    if summary.newest_observation.map_or(true, |n| observed > n) {
                        summary.newest_observation = Some(observed);
                    }
                }

                let Some(aqi) = view.aqi() else {
                    summary.without_aqi += 1;
                    continue;
                };
                let status = overall_status(aqi, view.pm25());
                *summary.by_status.entry(status).or_default() += 1;
                *summary
                    .by_category
                    .entry(AqiCategory::from_aqi(aqi))
                    .or_default() += 1;
                ranked.push(RankedStation {
                    idx: view.idx(),
                    name: view.city_name().unwrap_or("unknown").to_string(),
                    country: view.location().map(|l| l.country),
                    aqi,
                    status,
                    pollutants: POLLUTANTS
                        .iter()
                        .filter_map(|&key| view.pollutant(key).map(|v| (key, v)))
                        .collect(),
                });
            }

            // Stable sort keeps input order among equal AQIs.
            ranked.sort_by(|a, b| b.aqi.total_cmp(&a.aqi));
            ranked.truncate(top);
            summary.worst = ranked;
            summary
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serde_json::json;

        fn reading(idx: i64, name: &str, aqi: serde_json::Value, pm25: f64, time: &str) -> DetailedReading {
            DetailedReading(json!({
                "idx": idx,
                "aqi": aqi,
                "city": {"name": name},
                "iaqi": {"pm25": {"v": pm25}},
                "time": {"s": time}
            }))
        }

        fn readings() -> Vec<DetailedReading> {
            vec![
                reading(1, "Oakland, California, USA", json!(42), 8.0, "2024-05-01 10:00:00"),
                reading(2, "Delhi, India", json!(180), 90.0, "2024-05-01 22:30:00"),
                reading(3, "Fresno, California, USA", json!(120), 30.0, "2024-05-01 09:00:00"),
                reading(4, "Offline, USA", json!("-"), 0.0, "not a time"),
                reading(5, "Lahore, Pakistan", json!(180), 120.0, "2024-04-30 12:00:00"),
            ]
        }

        #[test]
        fn test_summary_counts() {
            let summary = Summary::from_readings(&readings(), None, 3);
            assert_eq!(summary.total, 5);
            assert_eq!(summary.without_aqi, 1);
            assert_eq!(summary.by_status.get(&Status::Good), Some(&1));
            assert_eq!(summary.by_status.get(&Status::SoSo), Some(&1));
            assert_eq!(summary.by_status.get(&Status::Bad), Some(&2));
            assert_eq!(summary.by_category.get(&AqiCategory::Unhealthy), Some(&2));
            assert_eq!(
                summary.newest_observation.unwrap().to_string(),
                "2024-05-01 22:30:00"
            );
        }

        #[test]
        fn test_worst_ordering() {
            let summary = Summary::from_readings(&readings(), None, 3);
            let idxs: Vec<Option<i64>> = summary.worst.iter().map(|r| r.idx).collect();
            assert_eq!(idxs, vec![Some(2), Some(5), Some(3)]);
            assert_eq!(summary.worst[0].name, "Delhi, India");
            assert_eq!(summary.worst[0].country.as_deref(), Some("India"));
            assert_eq!(summary.worst[0].pollutants, vec![("pm25", 90.0)]);
        }

        #[test]
        fn test_filter() {
            let summary = Summary::from_readings(&readings(), Some("california"), 10);
            assert_eq!(summary.total, 2);
            assert_eq!(summary.worst.len(), 2);
            assert_eq!(summary.worst[0].idx, Some(3));
        }

        #[test]
        fn test_empty() {
            let summary = Summary::from_readings(&[], None, 5);
            assert_eq!(summary.total, 0);
            assert!(summary.worst.is_empty());
            assert!(summary.newest_observation.is_none());
        }
    }
}
