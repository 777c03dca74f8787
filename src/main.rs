use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use replenishment_engine::io::{catalog, export, reporting};
use replenishment_engine::model::seasonal;
use replenishment_engine::{EngineConfig, ReplenishmentReportBuilder, TimeSeriesForecaster};

#[derive(Parser)]
#[command(name = "replenishment-engine")]
#[command(about = "Stock health, reorder timing and reorder quantities per SKU and store", long_about = None)]
struct Cli {
    /// Engine configuration (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a replenishment report for a catalog
    Report {
        /// Catalog CSV; the built-in sample catalog is used when omitted
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long, default_value_t = 30)]
        horizon_days: i64,
        /// Run date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
        #[arg(long)]
        seed: Option<u64>,
        /// Markdown report output
        #[arg(long, default_value = "replenishment_report.md")]
        out: PathBuf,
        #[arg(long)]
        recommendations_csv: Option<PathBuf>,
        /// Directory for one forecast CSV per SKU and store
        #[arg(long)]
        forecast_dir: Option<PathBuf>,
    },
    /// Project demand for a single base rate
    Forecast {
        #[arg(long)]
        base_demand: f64,
        #[arg(long, default_value_t = 30)]
        horizon_days: i64,
        #[arg(long)]
        today: Option<NaiveDate>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "forecast.csv")]
        out: PathBuf,
    },
    /// Show expected seasonal demand shifts for a month (1-12)
    Trends {
        #[arg(long)]
        month: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. SETUP LOGGING
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "info" })
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. LOAD CONFIGURATION
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Report {
            catalog: catalog_path,
            horizon_days,
            today,
            seed,
            out,
            recommendations_csv,
            forecast_dir,
        } => {
            if seed.is_some() {
                config.seed = seed;
            }
            let today = today.unwrap_or_else(|| Utc::now().date_naive());

            // 3. LOAD CATALOG
            let records = match &catalog_path {
                Some(path) => catalog::load_catalog(path)
                    .with_context(|| format!("failed to read catalog {}", path.display()))?,
                None => {
                    info!("no catalog given, using the built-in sample catalog");
                    catalog::demo_catalog()
                }
            };

            // 4. RUN ENGINE
            let builder = ReplenishmentReportBuilder::new(config)?;
            let report = builder.build_report(&records, horizon_days, today)?;

            // 5. EXPORT RESULTS
            std::fs::write(&out, reporting::render_report(&report))
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());

            if let Some(path) = recommendations_csv {
                export::write_recommendations_csv(&path, &report.recommendations)?;
                println!("Recommendations written to {}.", path.display());
            }

            if let Some(dir) = forecast_dir {
                std::fs::create_dir_all(&dir)?;
                for forecast in &report.forecasts {
                    let path = dir.join(format!("{}_{}.csv", forecast.store_id, forecast.sku));
                    export::write_forecast_csv(&path, &forecast.series)?;
                }
                println!("{} forecasts written to {}.", report.forecasts.len(), dir.display());
            }

            // 6. PRINT SUMMARY
            println!("\n=== Replenishment Summary ===");
            println!(
                "Critical: {} | Low: {} | Good: {} | Rejected: {}",
                report.totals.critical_count,
                report.totals.low_count,
                report.totals.good_count,
                report.failures.len()
            );
            println!("Units to reorder: {}", report.totals.total_reorder_quantity);
        }
        Commands::Forecast {
            base_demand,
            horizon_days,
            today,
            seed,
            out,
        } => {
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            let forecaster = TimeSeriesForecaster::new(config.forecast.clone())?;
            let series = match seed.or(config.seed) {
                Some(seed) => forecaster.forecast_seeded(base_demand, horizon_days, today, seed)?,
                None => forecaster.forecast_unseeded(base_demand, horizon_days, today)?,
            };
            export::write_forecast_csv(&out, &series)?;
            println!(
                "Forecast of {} days ({} units, avg confidence {}%) written to {}.",
                series.len(),
                series.total_units(),
                series.average_confidence(),
                out.display()
            );
        }
        Commands::Trends { month } => {
            let trends = seasonal::trends_for_month_number(month);
            if trends.is_empty() {
                println!("No seasonal shifts recorded for month {}.", month);
                return Ok(());
            }
            println!("Seasonal outlook for month {}:", month);
            for trend in trends {
                println!("- {}: {:+.0}%", trend.category, trend.percent_change);
            }
        }
    }

    Ok(())
}
