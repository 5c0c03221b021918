//! Crowd forecast command.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use venuepulse_core::{
    ActivityPredictor, Config, CrowdLevel, DayKind, HourOfDay, PredictionPoint, PredictorConfig,
};

#[derive(Args)]
pub struct PredictArgs {
    /// Starting hour (0-23); defaults to the current local hour
    #[arg(long)]
    hour: Option<u8>,
    /// Use the weekend demand shape
    #[arg(long, conflicts_with_all = ["weekday", "date"])]
    weekend: bool,
    /// Use the weekday demand shape
    #[arg(long, conflicts_with = "date")]
    weekday: bool,
    /// Derive the day kind from a date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,
    /// Random seed for reproducible output; overrides prediction.seed
    #[arg(long)]
    seed: Option<u64>,
    /// Print JSON instead of a chart
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ForecastOutput<'a> {
    day: DayKind,
    best_time: &'a str,
    points: &'a [PredictionPoint],
}

pub fn run(args: PredictArgs) -> Result<()> {
    let hour = match args.hour {
        Some(h) => HourOfDay::new(h)?,
        None => HourOfDay::now(),
    };

    let day = if args.weekend {
        DayKind::Weekend
    } else if args.weekday {
        DayKind::Weekday
    } else if let Some(date) = &args.date {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("Invalid date: '{date}'. Use YYYY-MM-DD"))?;
        DayKind::from_date(date)
    } else {
        DayKind::today()
    };

    let seed = match args.seed {
        Some(seed) => Some(seed),
        None => Config::load_or_default().prediction.seed,
    };
    let mut predictor = ActivityPredictor::with_config(&PredictorConfig { seed });
    let series = predictor.predict(hour, day);

    if args.json {
        let output = ForecastOutput {
            day,
            best_time: series.best_time_label(),
            points: series.points(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("\nCrowd forecast from {hour} ({day}):");
    println!("{}", "─".repeat(36));
    for point in &series {
        let marker = if point.is_best { " ★" } else { "" };
        println!(
            "{:>4}  {:<10} {}{}",
            point.hour_label,
            point.level.label(),
            bar(point.level),
            marker
        );
    }
    println!("{}", "─".repeat(36));
    println!("Best time to visit: {}", series.best_time_label());

    Ok(())
}

fn bar(level: CrowdLevel) -> String {
    let filled = CrowdLevel::ALL.iter().position(|l| *l == level).unwrap_or(0) + 1;
    format!("{}{}", "█".repeat(filled * 3), "·".repeat((4 - filled) * 3))
}
