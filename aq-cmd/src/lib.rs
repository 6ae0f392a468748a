//! Command implementations for the air quality CLI.
//!
//! `fetch` walks every WAQI station and writes their current readings to the
//! JSON document the static site serves; `summary` reads that document back.

use aq_utils::{output::DEFAULT_OUTPUT_PATH, rate_limit::FixedDelay};
use aq_waqi::{client::DEFAULT_BASE_URL, client::TOKEN_ENV_VAR, Bounds};
use clap::Subcommand;
use std::path::PathBuf;

pub mod fetch;
pub mod summary;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch current readings for every station and overwrite the output JSON (default)
    Fetch {
        /// Output path for the JSON array of readings
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,

        /// Milliseconds to wait before each per-station request
        #[arg(long, default_value_t = FixedDelay::DEFAULT_MILLIS)]
        delay_ms: u64,

        /// WAQI API root
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Listing box as minLat,minLon,maxLat,maxLon
        #[arg(long, default_value = "-90,-180,90,180", allow_hyphen_values = true)]
        bounds: Bounds,

        /// WAQI access token
        #[arg(long, env = TOKEN_ENV_VAR, hide_env_values = true)]
        token: Option<String>,
    },

    /// Summarize a previously written readings JSON
    Summary {
        /// Path to the JSON array of readings
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        input: PathBuf,

        /// Number of worst stations to list
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Only include stations whose name contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Print the summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Fetch {
            output,
            delay_ms,
            base_url,
            bounds,
            token,
        } => {
            let config = fetch::FetchConfig { output, bounds };
            fetch::run_fetch_command(&config, token, delay_ms, &base_url).await?;
            Ok(())
        }
        Command::Summary {
            input,
            top,
            filter,
            json,
        } => summary::run_summary(&input, filter.as_deref(), top, json),
    }
}
