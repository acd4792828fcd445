// In app/src/main.rs

use std::path::PathBuf;

use anyhow::Result;
use app_config::Settings;
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;
use web_server::AppState;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Charts a daily SMA 20/50 crossover strategy and its simulated equity."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Starts the HTTP server that serves the chart page and `/data` (the default).
    Serve,

    /// Fetches and computes the series once, then logs the head of it.
    Run {
        /// Write the full augmented series to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// How many leading rows to log.
        #[arg(long, default_value_t = 5)]
        rows: usize,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);

    tracing::info!(
        environment = %settings.app.environment,
        symbol = %settings.market_data.symbol,
        "Starting SMA crossover application"
    );

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => handle_serve(settings).await?,
        Commands::Run { csv, rows } => handle_run(settings, csv, rows).await?,
    }

    tracing::info!("Application has finished successfully.");

    Ok(())
}

fn init_tracing(log_level: &str) {
    let default_level = log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("hyper", tracing::Level::WARN)
            .with_target("reqwest", tracing::Level::WARN)
            .with_default(default_level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();
}

// --- "Serve" Subcommand Logic ---

/// Builds the configured price source and serves until terminated.
async fn handle_serve(settings: Settings) -> Result<()> {
    let source = api_client::new(&settings.market_data)?;
    let csv_dump = settings.debug.csv_dump.map(PathBuf::from);
    if let Some(path) = &csv_dump {
        tracing::info!(path = %path.display(), "Each computed series will be dumped to CSV.");
    }

    web_server::run(&settings.server, AppState::new(source, csv_dump)).await?;
    Ok(())
}

// --- "Run" Subcommand Logic ---

async fn handle_run(settings: Settings, csv: Option<PathBuf>, rows: usize) -> Result<()> {
    let source = api_client::new(&settings.market_data)?;
    let bars = source.fetch_daily_bars().await?;
    tracing::info!(symbol = %source.symbol(), bars = bars.len(), "Fetched daily bars.");

    let (series, payload) = engine::compute_chart(bars)?;

    for row in series.rows().take(rows) {
        tracing::info!(
            time = row.bar.epoch_seconds(),
            close = row.bar.close,
            signal = row.signal.value(),
            units = row.units,
            holdings = row.holdings,
            cash = row.cash,
            equity = row.equity,
            "row"
        );
    }

    let crossovers = series.signals.crossover_count();
    let final_equity = payload.data.last().map(|r| r.equity).unwrap_or_default();
    tracing::info!(crossovers, final_equity, "Series computed.");

    if let Some(path) = csv.or_else(|| settings.debug.csv_dump.map(PathBuf::from)) {
        engine::dump::write_csv(&path, &series)?;
        tracing::info!(path = %path.display(), "Wrote augmented series.");
    }

    Ok(())
}
