//! AQ CLI - Fetches WAQI station readings for the air quality site.

use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "aq-cli",
    version,
    about = "Air quality station data toolkit"
)]
struct Cli {
    /// Defaults to `fetch` with every default when omitted
    #[command(subcommand)]
    command: Option<aq_cmd::Command>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let command = resolve_command(Cli::parse())?;
    aq_cmd::run(command).await
}

/// No subcommand runs `fetch`, parsed by clap so defaults and
/// `WAQI_API_TOKEN` apply as if it had been typed.
fn resolve_command(cli: Cli) -> anyhow::Result<aq_cmd::Command> {
    if let Some(command) = cli.command {
        return Ok(command);
    }
    Cli::try_parse_from(["aq-cli", "fetch"])?
        .command
        .context("fetch subcommand missing")
}
