use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use trip_search::cache::{CacheConfig, CachedProvider};
use trip_search::dates::parse_dates;
use trip_search::domain::Trip;
use trip_search::flixbus::{FlixbusClient, FlixbusConfig};
use trip_search::geocode::{Geocoder, NominatimClient, NominatimConfig};
use trip_search::provider::Provider;
use trip_search::regiojet::{RegiojetClient, RegiojetConfig};
use trip_search::report::{
    default_output_path, home_dir, open_in_viewer, render_table, save_csv,
};
use trip_search::search::{
    ConsoleProgress, Orchestrator, ProviderSelection, SearchConfig, SearchOutcome, SearchRequest,
    SortOrder,
};

/// Search for bus and train trips across providers.
#[derive(Parser, Debug)]
#[command(name = "trip-search", author, version, about, long_about = None)]
struct Cli {
    /// Origin cities or countries, comma-separated
    #[arg(short, long)]
    from: String,

    /// Destination cities or countries, comma-separated
    #[arg(short, long)]
    to: Option<String>,

    /// Dates: today, tomorrow, YYYY-MM-DD, DD.MM.YYYY or DD.MM, comma-separated
    #[arg(short, long, default_value = "tomorrow")]
    date: String,

    /// Search every destination within this many km of the origin (0 = off)
    #[arg(short = 'D', long, default_value_t = 0)]
    distance: u32,

    /// Provider: all, flixbus or regiojet
    #[arg(short, long, default_value = "all")]
    provider: ProviderSelection,

    /// Output CSV path
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Sort by: price or departure
    #[arg(short, long, default_value = "price")]
    sort: SortOrder,

    /// Enable debug logs
    #[arg(short = 'v', long)]
    debug: bool,

    /// Maximum simultaneous trip searches
    #[arg(long, default_value_t = 8)]
    concurrency: usize,
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--debug`.
fn setup_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_providers(selection: ProviderSelection) -> Result<Vec<Arc<dyn Provider>>> {
    let geocoder: Arc<dyn Geocoder> = Arc::new(
        NominatimClient::new(NominatimConfig::default())
            .context("failed to create geocoding client")?,
    );
    let cache_config = CacheConfig::default();

    let mut providers: Vec<Arc<dyn Provider>> = Vec::new();
    if selection.includes_flixbus() {
        let client = FlixbusClient::new(FlixbusConfig::default(), Arc::clone(&geocoder))
            .context("failed to create Flixbus client")?;
        providers.push(Arc::new(CachedProvider::new(client, &cache_config)));
    }
    if selection.includes_regiojet() {
        let client = RegiojetClient::new(RegiojetConfig::default(), Arc::clone(&geocoder))
            .context("failed to create RegioJet client")?;
        providers.push(Arc::new(CachedProvider::new(client, &cache_config)));
    }
    Ok(providers)
}

/// Save the report and, for default-location reports, open the viewer.
/// Failures here are reported but don't fail the run.
fn save_and_open(cli: &Cli, trips: &[Trip]) {
    let path = match &cli.out {
        Some(path) => path.clone(),
        None => match home_dir() {
            Ok(home) => default_output_path(
                &home,
                &cli.from,
                cli.to.as_deref(),
                cli.distance,
                Local::now().naive_local(),
            ),
            Err(e) => {
                eprintln!("Error saving file: {e}");
                return;
            }
        },
    };

    if let Err(e) = save_csv(&path, trips) {
        eprintln!("Error saving file: {e}");
        return;
    }
    println!("\nSaved to {}", path.display());

    if cli.out.is_none()
        && let Err(e) = open_in_viewer(&path)
    {
        tracing::warn!(error = %e, "could not open report");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    // Configuration errors are fatal before any search starts
    let today = Local::now().date_naive();
    let dates = parse_dates(&cli.date, today).context("Date error")?;
    let request = SearchRequest::new(&cli.from, cli.to.as_deref(), cli.distance, dates)?;
    let config = SearchConfig::default()
        .with_max_concurrent(cli.concurrency)
        .with_sort(cli.sort);

    let providers = build_providers(cli.provider)?;
    let orchestrator = Orchestrator::new(providers, config, Arc::new(ConsoleProgress::new()))?;

    let SearchOutcome::Found(trips) = orchestrator.run(&request).await else {
        println!("No trips found.");
        return Ok(());
    };

    println!();
    print!("{}", render_table(&trips));
    save_and_open(&cli, &trips);

    Ok(())
}
