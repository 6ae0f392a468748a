//! Summarize a readings JSON written by `fetch`.

use aq_data::summary::Summary;
use aq_utils::output::read_json_array;
use aq_waqi::DetailedReading;
use log::info;
use std::path::Path;

pub fn load_summary(input: &Path, filter: Option<&str>, top: usize) -> anyhow::Result<Summary> {
    let readings: Vec<DetailedReading> = read_json_array(input)?;
    info!("Loaded {} readings from {}", readings.len(), input.display());
    Ok(Summary::from_readings(&readings, filter, top))
}

pub fn run_summary(input: &Path, filter: Option<&str>, top: usize, json: bool) -> anyhow::Result<()> {
    let summary = load_summary(input, filter, top)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    info!(
        "{} stations, {} without a current AQI",
        summary.total, summary.without_aqi
    );
    if let Some(newest) = summary.newest_observation {
        info!("Newest observation: {}", newest);
    }
    for (status, count) in &summary.by_status {
        info!("  {}: {}", status, count);
    }
    for (category, count) in &summary.by_category {
        info!("  {}: {}", category, count);
    }
    for (rank, station) in summary.worst.iter().enumerate() {
        let pollutants = station
            .pollutants
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ");
        info!(
            "  #{} {} AQI {} ({}) {}",
            rank + 1,
            station.name,
            station.aqi,
            station.status,
            pollutants
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_data::classification::Status;
    use aq_utils::output::write_json_array;
    use serde_json::json;

    #[test]
    fn test_load_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("air-quality-data.json");
        write_json_array(
            &path,
            &[
                json!({"idx": 1, "aqi": 30, "city": {"name": "Reykjavik, Iceland"}}),
                json!({"idx": 2, "aqi": 160, "city": {"name": "Delhi, India"}}),
            ],
        )
        .unwrap();

        let summary = load_summary(&path, None, 1).unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.worst.len(), 1);
        assert_eq!(summary.worst[0].status, Status::Bad);

        assert!(run_summary(&path, Some("iceland"), 5, false).is_ok());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_summary(&dir.path().join("nope.json"), None, 5).is_err());
    }
}
