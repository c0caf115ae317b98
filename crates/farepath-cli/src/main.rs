use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use farepath_lib::{
    plan_itinerary, populate_graph, AirportCode, AirportRegistry, FallbackProvider, FlightGraph,
    ItinerarySummary, LiveProvider, RenderMode, SyntheticProvider,
};

/// Environment variable holding the RapidAPI key for live fare data.
const API_KEY_ENV: &str = "FAREPATH_API_KEY";

#[derive(Parser, Debug)]
#[command(version, about = "Flight route finder over live or synthetic fare data")]
struct Cli {
    /// Path to the OurAirports-format airports CSV.
    #[arg(long, default_value = "airports.csv")]
    airports_csv: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan the best itinerary between two airports.
    Route {
        /// Origin IATA code.
        #[arg(long = "from")]
        from: String,
        /// Destination IATA code.
        #[arg(long = "to")]
        to: String,
        /// Force synthetic fare data even when an API key is configured.
        #[arg(long)]
        synthetic: bool,
        /// Seed for the synthetic fare generator.
        #[arg(long, default_value_t = 7)]
        seed: u64,
        /// Upper bound on airports included in the fare graph.
        #[arg(long, default_value_t = 50)]
        max_airports: usize,
        /// Emit the itinerary as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Look up an airport record by IATA code.
    Lookup {
        /// IATA code to look up.
        #[arg(long)]
        code: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let registry = AirportRegistry::from_csv_path(&cli.airports_csv).with_context(|| {
        format!(
            "failed to load airports from {}",
            cli.airports_csv.display()
        )
    })?;
    tracing::debug!(airports = registry.len(), "airport registry loaded");

    match cli.command {
        Command::Route {
            from,
            to,
            synthetic,
            seed,
            max_airports,
            json,
        } => handle_route(&registry, &from, &to, synthetic, seed, max_airports, json),
        Command::Lookup { code } => handle_lookup(&registry, &code),
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_route(
    registry: &AirportRegistry,
    from: &str,
    to: &str,
    synthetic: bool,
    seed: u64,
    max_airports: usize,
    json: bool,
) -> Result<()> {
    // Endpoints are validated before any fare traffic happens.
    let origin = registry.resolve(from)?;
    let destination = registry.resolve(to)?;
    let airports = sample_airports(registry, origin, destination, max_airports);

    let mut graph = FlightGraph::new();
    let fallback = SyntheticProvider::new(seed);
    match live_provider(synthetic) {
        Some(live) => {
            tracing::info!("using live fare data with synthetic fallback");
            let provider = FallbackProvider::new(live, fallback);
            populate_graph(&mut graph, &provider, &airports)
                .context("failed to populate the fare graph")?;
        }
        None => {
            tracing::info!("using synthetic fare data");
            populate_graph(&mut graph, &fallback, &airports)
                .context("failed to populate the fare graph")?;
        }
    }
    tracing::info!(
        airports = graph.airport_count(),
        offers = graph.offer_count(),
        "fare graph populated"
    );

    let itinerary = plan_itinerary(registry, &graph, from, to)?;
    let summary = ItinerarySummary::from_itinerary(registry, &itinerary)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.render(RenderMode::PlainText));
    }
    Ok(())
}

fn handle_lookup(registry: &AirportRegistry, code: &str) -> Result<()> {
    let code = AirportCode::parse(code)?;
    let airport = registry
        .lookup(code)
        .with_context(|| format!("unknown airport code {code}"))?;

    println!("{}: {}", airport.code, airport.name);
    if let Some(municipality) = &airport.municipality {
        println!("Municipality: {municipality}");
    }
    println!("Country: {}", airport.country);
    if let Some(coordinates) = airport.coordinates {
        println!(
            "Coordinates: {:.4}, {:.4}",
            coordinates.latitude, coordinates.longitude
        );
    }
    Ok(())
}

/// Live fare data is used only when a key is configured, the caller did not
/// force synthetic data, and the API answers a probe.
fn live_provider(force_synthetic: bool) -> Option<LiveProvider> {
    if force_synthetic {
        return None;
    }
    let api_key = env::var(API_KEY_ENV).ok()?;
    let provider = LiveProvider::new(api_key).ok()?;
    if provider.probe() {
        Some(provider)
    } else {
        tracing::warn!("fare API probe failed, falling back to synthetic data");
        None
    }
}

/// The endpoints plus a deterministic sample of further registry airports,
/// bounded so live sessions stay within API quota.
fn sample_airports(
    registry: &AirportRegistry,
    origin: AirportCode,
    destination: AirportCode,
    max_airports: usize,
) -> Vec<AirportCode> {
    let mut airports = vec![origin, destination];
    let mut rest: Vec<AirportCode> = registry
        .codes()
        .filter(|code| *code != origin && *code != destination)
        .collect();
    rest.sort();
    airports.extend(rest.into_iter().take(max_airports.saturating_sub(2)));
    airports
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
