//! Venue lookup commands.

use anyhow::Result;
use clap::Subcommand;

use venuepulse_core::{
    fetch_with_fallback, format_distance, Config, Coordinates, JsonFileSource, NearbyVenue,
    StaticSource, Venue, VenueSource,
};

#[derive(Subcommand)]
pub enum VenuesAction {
    /// Venues near a point, nearest first
    Nearby {
        /// Latitude (defaults to location.latitude)
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,
        /// Longitude (defaults to location.longitude)
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,
        /// Search radius in miles (defaults to search.radius_miles)
        #[arg(long)]
        radius: Option<f64>,
        /// Only venues offering this sport
        #[arg(long)]
        sport: Option<String>,
        /// JSON venue file (defaults to venues_file)
        #[arg(long)]
        file: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every valid venue in the venue file
    List {
        /// JSON venue file (defaults to venues_file)
        #[arg(long)]
        file: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: VenuesAction) -> Result<()> {
    let config = Config::load_or_default();
    match action {
        VenuesAction::Nearby {
            lat,
            lng,
            radius,
            sport,
            file,
            json,
        } => nearby(&config, lat.zip(lng), radius, sport, file, json),
        VenuesAction::List { file, json } => list(&config, file, json),
    }
}

fn primary_source(config: &Config, file: Option<String>) -> Box<dyn VenueSource> {
    match file.or_else(|| config.venues_file.clone()) {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(StaticSource::fallback()),
    }
}

fn nearby(
    config: &Config,
    origin: Option<(f64, f64)>,
    radius: Option<f64>,
    sport: Option<String>,
    file: Option<String>,
    json: bool,
) -> Result<()> {
    let mut query = match origin {
        Some((lat, lng)) => config.nearby_query_at(Coordinates::new(lat, lng)?),
        None => config.nearby_query()?,
    };
    if let Some(radius) = radius {
        query.radius_miles = radius;
    }
    if sport.is_some() {
        query = query.with_sport(sport);
    }

    tracing::debug!(
        lat = query.origin.lat,
        lng = query.origin.lng,
        radius = query.radius_miles,
        sport = ?query.sport,
        "nearby venue search"
    );

    let primary = primary_source(config, file);
    let fallback = StaticSource::fallback();
    let found = fetch_with_fallback(primary.as_ref(), &fallback, &query);

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("No venues within {:.1} mi.", query.radius_miles);
        return Ok(());
    }

    for NearbyVenue {
        venue,
        distance_miles,
    } in &found
    {
        println!(
            "{:<8} {:<32} {:<10} {}",
            format_distance(*distance_miles),
            venue.name,
            crowd_label(venue),
            venue.sports.join(", ")
        );
    }
    Ok(())
}

fn list(config: &Config, file: Option<String>, json: bool) -> Result<()> {
    let venues: Vec<Venue> = match file.or_else(|| config.venues_file.clone()) {
        Some(path) => JsonFileSource::new(path).load()?,
        None => StaticSource::fallback().venues().to_vec(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&venues)?);
        return Ok(());
    }

    for venue in &venues {
        println!(
            "{:<16} {:<32} {:<10} ({:.4}, {:.4})",
            venue.id,
            venue.name,
            crowd_label(venue),
            venue.location.lat,
            venue.location.lng
        );
    }
    println!("\n{} venue(s)", venues.len());
    Ok(())
}

fn crowd_label(venue: &Venue) -> &'static str {
    venue.crowd_level.map_or("-", |level| level.label())
}
