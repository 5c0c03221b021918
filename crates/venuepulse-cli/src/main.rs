use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "venuepulse", version, about = "VenuePulse CLI")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast crowd levels for the next few hours
    Predict(commands::predict::PredictArgs),
    /// Distance between two coordinates
    Distance(commands::distance::DistanceArgs),
    /// Venue lookup
    Venues {
        #[command(subcommand)]
        action: commands::venues::VenuesAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins, then --verbose, then warnings only
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .init();

    let result = match cli.command {
        Commands::Predict(args) => commands::predict::run(args),
        Commands::Distance(args) => commands::distance::run(args),
        Commands::Venues { action } => commands::venues::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
