use clap::{Parser, Subcommand};
use ridemaps::captains::{JsonCaptainStore, ProximitySearch};
use ridemaps::config::{MapsConfig, GOOGLE_MAPS_BASE_URL};
use ridemaps::logging::{init_logging, LogFormat};
use ridemaps::maps::{AddressResolver, MapsError, RouteMetrics, SuggestionProvider, UreqTransport};
use ridemaps::server::{self, AppState};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

/// ridemaps — geolocation helpers for ride-hailing backends
///
/// Geocodes addresses, measures travel distance and time, autocompletes
/// places, and finds captains around a point. Results are printed as JSON.
///
/// Examples:
///   ridemaps coords "MG Road, Bengaluru"
///   ridemaps distance "Koramangala" "Indiranagar"
///   ridemaps suggest "brigade"
///   ridemaps nearby --ltd 12.9716 --lng 77.5946 --radius 3
///   ridemaps serve --port 4000
#[derive(Parser)]
#[command(name = "ridemaps", version, about, long_about = None)]
struct Cli {
    /// Google Maps API key.
    #[arg(long, global = true, env = "GOOGLE_MAPS_API", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Base URL of the maps web services (proxy or local fake).
    #[arg(long, global = true, env = "RIDEMAPS_MAPS_BASE_URL", default_value = GOOGLE_MAPS_BASE_URL)]
    maps_base_url: String,

    /// Captain collection file (JSON array). Defaults to ~/.ridemaps/captains.json.
    #[arg(long, global = true, env = "RIDEMAPS_CAPTAINS")]
    captains: Option<PathBuf>,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Geocode an address to coordinates.
    Coords { address: String },

    /// Distance and travel time between two places.
    Distance { origin: String, destination: String },

    /// Autocomplete suggestions for partial input.
    Suggest { input: String },

    /// Captains within a radius (km) of a point.
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        ltd: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,

        /// Radius in kilometers.
        #[arg(long)]
        radius: Option<f64>,
    },

    /// Run the HTTP API.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, short = 'p', default_value_t = 3000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional; real environment variables win.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(MapsConfig::with_base_url(cli.api_key, &cli.maps_base_url));
    let transport = Arc::new(UreqTransport::new());

    match cli.command {
        Command::Coords { address } => {
            let coord = AddressResolver::new(transport, config).resolve(&address).await?;
            print_json(&coord)
        }
        Command::Distance { origin, destination } => {
            let metric = RouteMetrics::new(transport, config).measure(&origin, &destination).await?;
            print_json(&metric)
        }
        Command::Suggest { input } => {
            let list = SuggestionProvider::new(transport, config).suggest(&input).await?;
            print_json(&list)
        }
        Command::Nearby { ltd, lng, radius } => {
            let store = load_store(cli.captains)?;
            let captains = ProximitySearch::new(Arc::new(store)).find_nearby(ltd, lng, radius).await?;
            print_json(&captains)
        }
        Command::Serve { host, port } => {
            let store = load_store(cli.captains)?;
            let state = AppState::new((*config).clone(), transport, Arc::new(store));
            server::start(&host, port, state).await?;
            Ok(())
        }
    }
}

fn load_store(path: Option<PathBuf>) -> Result<JsonCaptainStore, MapsError> {
    match path {
        Some(p) => JsonCaptainStore::load_from(p),
        None => JsonCaptainStore::load(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
