use crate::error::WaqiError;
use std::fmt;
use std::str::FromStr;

/// A latitude/longitude box for the `/v2/map/bounds` listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Every station on the map.
    pub const WORLD: Bounds = Bounds {
        min_lat: -90.0,
        min_lon: -180.0,
        max_lat: 90.0,
        max_lon: 180.0,
    };

    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Result<Self, WaqiError> {
        let bounds = Bounds {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    fn validate(&self) -> Result<(), WaqiError> {
        let lat_ok = |v: f64| (-90.0..=90.0).contains(&v);
        let lon_ok = |v: f64| (-180.0..=180.0).contains(&v);
        if !lat_ok(self.min_lat) || !lat_ok(self.max_lat) {
            return Err(WaqiError::InvalidBounds(format!(
                "latitude out of range in {}",
                self
            )));
        }
        if !lon_ok(self.min_lon) || !lon_ok(self.max_lon) {
            return Err(WaqiError::InvalidBounds(format!(
                "longitude out of range in {}",
                self
            )));
        }
        if self.min_lat > self.max_lat || self.min_lon > self.max_lon {
            return Err(WaqiError::InvalidBounds(format!(
                "minimum exceeds maximum in {}",
                self
            )));
        }
        Ok(())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::WORLD
    }
}

/// Renders as the `latlng` query value: `minLat,minLon,maxLat,maxLon`.
impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

impl FromStr for Bounds {
    type Err = WaqiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<f64>()
                    .map_err(|_| WaqiError::InvalidBounds(format!("not a number: {:?}", p.trim())))
            })
            .collect::<Result<Vec<f64>, _>>()?;
        match parts.as_slice() {
            [min_lat, min_lon, max_lat, max_lon] => {
                Bounds::new(*min_lat, *min_lon, *max_lat, *max_lon)
            }
            _ => Err(WaqiError::InvalidBounds(format!(
                "expected 4 comma-separated values, got {}",
                parts.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Bounds;

    #[test]
    fn test_world_query() {
        assert_eq!(Bounds::WORLD.to_string(), "-90,-180,90,180");
        assert_eq!(Bounds::default(), Bounds::WORLD);
    }

    #[test]
    fn test_parse() {
        let bounds: Bounds = "32.5, -124.5, 42.0, -114.1".parse().unwrap();
        assert_eq!(bounds.min_lat, 32.5);
        assert_eq!(bounds.max_lon, -114.1);
        assert_eq!(bounds.to_string(), "32.5,-124.5,42,-114.1");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("1,2,3".parse::<Bounds>().is_err());
        assert!("a,b,c,d".parse::<Bounds>().is_err());
        assert!("-91,-180,90,180".parse::<Bounds>().is_err());
        assert!("-90,-181,90,180".parse::<Bounds>().is_err());
        assert!("10,0,-10,5".parse::<Bounds>().is_err());
    }
}
