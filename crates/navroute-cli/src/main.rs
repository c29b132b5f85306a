//! Command line front end for the navroute engine.
//!
//! Loads the CSV catalogs, resolves airports with the same substring
//! search a picker UI would use, and prints the constructed route as a
//! leg table or JSON.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use navroute_core::{
    build_route, Airport, AirportCatalog, CorridorConfig, NavaidCatalog, Route,
};

#[derive(Parser, Debug)]
#[command(name = "navroute", version, about = "Plot a flight route between two airports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a route with navaid waypoints between two airports
    Plan {
        /// Path to the navaid dataset (navaid.csv)
        #[arg(long)]
        navaids: PathBuf,

        /// Path to the airport dataset (airports.csv)
        #[arg(long)]
        airports: PathBuf,

        /// Origin airport ICAO code
        origin: String,

        /// Destination airport ICAO code
        destination: String,

        /// Corridor half-width in nautical miles
        #[arg(long, default_value_t = 1.0)]
        corridor_width_nm: f64,

        /// Minimum waypoint distance from either endpoint in nautical miles
        #[arg(long, default_value_t = 50.0)]
        endpoint_margin_nm: f64,

        /// Emit the route as JSON instead of a leg table
        #[arg(long)]
        json: bool,
    },

    /// Search the airport catalog by ICAO, IATA, name or city
    Airports {
        /// Path to the airport dataset (airports.csv)
        #[arg(long)]
        airports: PathBuf,

        /// Substring to match; omit to list major-airport suggestions
        query: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Plan {
            navaids,
            airports,
            origin,
            destination,
            corridor_width_nm,
            endpoint_margin_nm,
            json,
        } => {
            let config = CorridorConfig {
                half_width_nm: corridor_width_nm,
                endpoint_margin_nm,
            };
            plan(&navaids, &airports, &origin, &destination, &config, json)
        }
        Command::Airports { airports, query } => list_airports(&airports, query.as_deref()),
    }
}

fn plan(
    navaids_path: &Path,
    airports_path: &Path,
    origin_icao: &str,
    destination_icao: &str,
    config: &CorridorConfig,
    json: bool,
) -> Result<()> {
    let navaids = load_navaids(navaids_path)?;
    let airports = load_airports(airports_path)?;

    let origin = resolve_airport(&airports, origin_icao)?;
    let destination = resolve_airport(&airports, destination_icao)?;

    let route = build_route(origin, destination, &navaids, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&route)?);
    } else {
        print_route(&route);
    }
    Ok(())
}

fn list_airports(airports_path: &Path, query: Option<&str>) -> Result<()> {
    let airports = load_airports(airports_path)?;

    let matches = match query {
        Some(text) => airports.search(text),
        None => airports.suggestions(),
    };
    if matches.is_empty() {
        println!("no matching airports");
        return Ok(());
    }

    for airport in matches {
        print_airport_line(airport);
    }
    Ok(())
}

fn load_navaids(path: &Path) -> Result<NavaidCatalog> {
    let file = File::open(path)
        .with_context(|| format!("failed to open navaid dataset {}", path.display()))?;
    let (catalog, report) = NavaidCatalog::from_reader(file)
        .with_context(|| format!("failed to parse navaid dataset {}", path.display()))?;

    tracing::info!(loaded = report.loaded, "loaded navaids");
    if report.skipped > 0 {
        tracing::warn!(skipped = report.skipped, "dropped unusable navaid rows");
    }
    if catalog.is_empty() {
        bail!("navaid dataset {} contains no usable records", path.display());
    }
    Ok(catalog)
}

fn load_airports(path: &Path) -> Result<AirportCatalog> {
    let file = File::open(path)
        .with_context(|| format!("failed to open airport dataset {}", path.display()))?;
    let (catalog, report) = AirportCatalog::from_reader(file)
        .with_context(|| format!("failed to parse airport dataset {}", path.display()))?;

    tracing::info!(loaded = report.loaded, "loaded airports");
    if report.skipped > 0 {
        tracing::debug!(skipped = report.skipped, "dropped non-qualifying airport rows");
    }
    if catalog.is_empty() {
        bail!(
            "airport dataset {} contains no usable records",
            path.display()
        );
    }
    Ok(catalog)
}

/// Resolve an ICAO code, suggesting close matches when it is unknown.
fn resolve_airport<'a>(catalog: &'a AirportCatalog, icao: &str) -> Result<&'a Airport> {
    if let Some(airport) = catalog.get(icao) {
        return Ok(airport);
    }

    let suggestions = catalog.search(icao);
    if suggestions.is_empty() {
        bail!("airport '{icao}' not found");
    }
    let idents: Vec<&str> = suggestions.iter().map(|a| a.icao.as_str()).collect();
    bail!("airport '{icao}' not found; did you mean {}?", idents.join(", "));
}

fn print_route(route: &Route) {
    println!(
        "{} -> {}: {:.1} nm, {} waypoint(s)",
        route.origin.icao,
        route.destination.icao,
        route.total_distance_nm,
        route.waypoints.len()
    );
    println!();
    print_endpoint_line("DEP", &route.origin);
    for waypoint in &route.waypoints {
        let navaid = &waypoint.navaid;
        let mut details = format!("{:.3} MHz", navaid.frequency_mhz);
        if let Some(channel) = &navaid.dme_channel {
            details.push_str(&format!(", DME {channel}"));
        }
        println!(
            "  {:<5} {:<8} {:>8.1} nm  {} ({})",
            navaid.ident, navaid.kind.to_string(), waypoint.distance_from_origin_nm, navaid.name, details
        );
    }
    print_endpoint_line("ARR", &route.destination);
}

fn print_endpoint_line(role: &str, airport: &Airport) {
    println!(
        "  {:<5} {:<8} {:>8}     {} ({})",
        airport.icao, role, "", airport.name, airport.position
    );
}

fn print_airport_line(airport: &Airport) {
    let iata = airport
        .iata
        .as_deref()
        .map(|code| format!(" ({code})"))
        .unwrap_or_default();
    let city = airport.city.as_deref().unwrap_or("-");
    println!(
        "  {:<5}{:<7} {:<40} {}, {}",
        airport.icao, iata, airport.name, city, airport.country
    );
}
