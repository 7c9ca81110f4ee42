use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use emtportal::{Directory, EmtPortalConfig, RankedDestination, telemetry, web};

/// Hospital distance lookup and reference directory for volunteer EMT staff
#[derive(Parser, Debug)]
#[command(name = "emtportal", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Port to listen on, defaults to the configured server port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List hospitals nearest to a location
    Nearest {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Number of hospitals to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = EmtPortalConfig::load_from_path(cli.config.clone())?;
    telemetry::init(&config.logging, cli.verbose)?;
    tracing::debug!(
        "Using config from: {}",
        cli.config
            .or_else(EmtPortalConfig::get_config_path)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string())
    );

    match cli.command {
        Command::Serve { port } => web::run(&config, port.unwrap_or(config.server.port)).await,
        Command::Nearest { lat, lon, limit } => nearest(&config, lat, lon, limit).await,
    }
}

async fn nearest(config: &EmtPortalConfig, lat: f64, lon: f64, limit: Option<usize>) -> Result<()> {
    let resolver = web::build_resolver(config)?;
    let directory = Directory::load(&config.directory)?;

    let ranked = resolver
        .resolve_from(lat, lon, directory.hospitals().to_vec())
        .await?;

    let shown = limit.unwrap_or(ranked.len());
    println!("Hospitals nearest to {lat}, {lon}:");
    for hospital in ranked.iter().take(shown) {
        println!("  {}", describe(hospital));
    }
    Ok(())
}

fn describe(ranked: &RankedDestination) -> String {
    let (distance, travel_time) = ranked
        .distance
        .as_ref()
        .map(|d| (d.distance_text.as_str(), d.duration_text.as_str()))
        .unwrap_or(("Unknown", "Unknown"));
    let trauma = if ranked.hospital.trauma { " [Trauma]" } else { "" };
    format!(
        "{}{} - {} ({}) - {}",
        ranked.hospital.name, trauma, distance, travel_time, ranked.hospital.phone
    )
}
