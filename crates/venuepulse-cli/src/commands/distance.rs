//! Great-circle distance command.

use anyhow::Result;
use clap::Args;

use venuepulse_core::{calculate_distance, distance_km, format_distance, Coordinates};

#[derive(Args)]
pub struct DistanceArgs {
    /// Latitude of the first point
    #[arg(allow_negative_numbers = true)]
    lat1: f64,
    /// Longitude of the first point
    #[arg(allow_negative_numbers = true)]
    lng1: f64,
    /// Latitude of the second point
    #[arg(allow_negative_numbers = true)]
    lat2: f64,
    /// Longitude of the second point
    #[arg(allow_negative_numbers = true)]
    lng2: f64,
    /// Report kilometres instead of miles
    #[arg(long)]
    km: bool,
}

pub fn run(args: DistanceArgs) -> Result<()> {
    let from = Coordinates::new(args.lat1, args.lng1)?;
    let to = Coordinates::new(args.lat2, args.lng2)?;

    if args.km {
        println!("{:.2} km", distance_km(from, to));
    } else {
        let miles = calculate_distance(from, to);
        println!("{:.2} mi ({})", miles, format_distance(miles));
    }
    Ok(())
}
