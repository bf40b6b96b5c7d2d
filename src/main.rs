use anyhow::{bail, Context};
use clap::Parser;
use vnfood_nearby::{
    sdk::config::ServiceConfig,
    sdk::coordinator::{ProximitySearchCoordinator, RouteOutcome, SearchOutcome, SearchSettings},
    sdk::geo::Coordinate,
    sdk::location::StaticLocation,
    sdk::routing::{open_directions, NearbyError, NominatimSearch, OsrmRouter, StdoutLauncher},
    sdk::util::log::init_logging,
};

/// Find food places near a position and get driving directions to one of them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Latitude of the current position (e.g., 10.7769)
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude of the current position (e.g., 106.7009)
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,

    /// Dish or place to look for (e.g., "phở")
    #[arg(short, long)]
    query: String,

    /// Maximum straight-line distance in kilometres
    #[arg(long, default_value_t = vnfood_nearby::sdk::coordinator::SEARCH_RADIUS_KM)]
    radius_km: f64,

    /// Route to the n-th result (1-based) and print the travel time
    #[arg(short, long)]
    route: Option<usize>,

    /// Print the final state as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { "debug" } else { "info" });
    dotenvy::dotenv().ok();

    let config = ServiceConfig::from_env().context("Invalid service configuration")?;
    let settings = SearchSettings {
        radius_km: cli.radius_km,
        query_suffix: config.query_suffix.clone(),
        ..SearchSettings::default()
    };

    let position = cli.lat.zip(cli.lon).map(|(lat, lon)| Coordinate::new(lat, lon));
    let coordinator = ProximitySearchCoordinator::with_settings(
        StaticLocation::new(position),
        NominatimSearch::new(&config).context("Failed to build search client")?,
        OsrmRouter::new(&config).context("Failed to build routing client")?,
        settings,
    );

    if let Err(e) = coordinator.acquire_location().await {
        bail!("{e}. Pass --lat and --lon to search nearby.");
    }

    match coordinator.search(&cli.query).await {
        Ok(SearchOutcome::Ready(count)) => log::info!("Found {} nearby places", count),
        Ok(SearchOutcome::Skipped) => bail!("Nothing to search for"),
        Ok(SearchOutcome::Superseded) => {}
        Err(e @ NearbyError::NoResults { .. }) => {
            println!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e).context("Search failed"),
    }

    let snapshot = coordinator.snapshot();
    if let Some(n) = cli.route {
        let place = n
            .checked_sub(1)
            .and_then(|i| snapshot.places.get(i))
            .with_context(|| format!("No result #{} (have {})", n, snapshot.places.len()))?;

        match coordinator.route(place.coordinate).await {
            Ok(RouteOutcome::Ready { eta_minutes }) => {
                if !cli.json {
                    println!("Travel time to {}: {} min", place.display_name, eta_minutes);
                    open_directions(&StdoutLauncher, place.coordinate);
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("{}", e),
        }
    }

    let snapshot = coordinator.snapshot();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else if cli.route.is_none() {
        for (i, place) in snapshot.places.iter().enumerate() {
            println!(
                "{:>2}. {} ({:.2} km)",
                i + 1,
                place.display_name,
                place.distance_km
            );
        }
    }

    Ok(())
}
