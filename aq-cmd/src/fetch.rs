//! Fetch current readings for every WAQI station and write them to disk.
//!
//! Two phases: one listing call for the whole bounding box, then one feed
//! call per distinct station. A failed listing aborts the run before anything
//! is written; a failed feed is logged and skipped.

use aq_utils::{
    output::write_json_array,
    rate_limit::{FixedDelay, RateLimiter},
};
use aq_waqi::{client::TOKEN_ENV_VAR, Bounds, DetailedReading, WaqiApi, WaqiClient};
use anyhow::{anyhow, Context};
use log::{error, info, warn};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    pub output: PathBuf,
    pub bounds: Bounds,
}

/// What a fetch run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchReport {
    /// Stations returned by the listing call.
    pub listed: usize,
    /// Listing entries skipped because their uid was already processed.
    pub duplicates: usize,
    /// Readings written to the output.
    pub fetched: usize,
    /// Stations whose feed call failed.
    pub failed: usize,
}

/// Resolve the API token, treating an empty value as missing.
pub fn resolve_token(value: Option<String>) -> anyhow::Result<String> {
    match value {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(anyhow!("{} is not set", TOKEN_ENV_VAR)),
    }
}

/// List stations in `bounds` and fetch each distinct one, in listing order.
///
/// Only the listing call can fail the whole operation.
pub async fn fetch_readings<A, L>(
    api: &A,
    limiter: &mut L,
    bounds: &Bounds,
) -> anyhow::Result<(Vec<DetailedReading>, FetchReport)>
where
    A: WaqiApi + ?Sized,
    L: RateLimiter + ?Sized,
{
    info!("Fetching list of all stations...");
    let stations = match api.list_stations(bounds).await {
        Ok(stations) => stations,
        Err(e) => {
            error!("Failed to fetch station list: {}", e);
            return Err(anyhow::Error::new(e).context("Failed to fetch station list"));
        }
    };

    let total = stations.len();
    info!("Found {} stations", total);

    let mut report = FetchReport {
        listed: total,
        ..Default::default()
    };
    let mut seen = HashSet::new();
    let mut readings = Vec::new();

    for (position, station) in stations.iter().enumerate() {
        if !seen.insert(station.uid.clone()) {
            report.duplicates += 1;
            continue;
        }

        limiter.wait().await;

        match api.station_feed(&station.uid).await {
            Ok(reading) => {
                readings.push(reading);
                info!(
                    "Fetched data for station {} - {}/{} ({} valid)",
                    station.label(),
                    position + 1,
                    total,
                    readings.len()
                );
            }
            Err(e) => {
                report.failed += 1;
                warn!("Failed to fetch station {}: {}", station.label(), e);
            }
        }
    }

    report.fetched = readings.len();
    Ok((readings, report))
}

/// The whole fetch: list, fetch each station, overwrite `config.output`.
///
/// Nothing is written when the listing fails. An empty result still writes `[]`.
pub async fn run_fetch<A, L>(
    api: &A,
    limiter: &mut L,
    config: &FetchConfig,
) -> anyhow::Result<FetchReport>
where
    A: WaqiApi + ?Sized,
    L: RateLimiter + ?Sized,
{
    let (readings, report) = fetch_readings(api, limiter, &config.bounds).await?;

    info!(
        "Writing data for {} stations to {}",
        readings.len(),
        config.output.display()
    );
    write_json_array(&config.output, &readings)?;
    info!(
        "Data write complete! {} fetched, {} failed, {} duplicate entries skipped",
        report.fetched, report.failed, report.duplicates
    );
    Ok(report)
}

/// Entry point for `aq-cli fetch` against the real API.
///
/// `token` comes from `--token` or `WAQI_API_TOKEN`; without one the run
/// fails before any request is made.
pub async fn run_fetch_command(
    config: &FetchConfig,
    token: Option<String>,
    delay_ms: u64,
    base_url: &str,
) -> anyhow::Result<FetchReport> {
    let token = resolve_token(token)?;
    let client = WaqiClient::new(token).with_base_url(base_url);
    let mut limiter = FixedDelay::from_millis(delay_ms);
    run_fetch(&client, &mut limiter, config)
        .await
        .context("Air quality fetch failed")
}
