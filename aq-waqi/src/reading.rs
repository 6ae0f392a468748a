use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `data` object of a `/feed/@<uid>/` response.
///
/// Opaque on purpose: it is collected and written back out exactly as
/// received. See `aq-data` for read-only views over the common fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetailedReading(pub Value);

impl DetailedReading {
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::DetailedReading;
    use serde_json::json;

    #[test]
    fn test_serializes_verbatim() {
        let raw = r#"{"aqi":42,"idx":3901,"iaqi":{"pm25":{"v":17}},"unknown":[1,2,{"x":null}]}"#;
        let reading: DetailedReading = serde_json::from_str(raw).unwrap();
        assert_eq!(reading.as_value()["idx"], json!(3901));
        let back: serde_json::Value = serde_json::from_str(&serde_json::to_string(&reading).unwrap()).unwrap();
        assert_eq!(back, serde_json::from_str::<serde_json::Value>(raw).unwrap());
    }
}
