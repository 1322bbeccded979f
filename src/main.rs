use anyhow::Context;
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Parser;
use inventory_reports::constants::SERVICE_DATE_FORMAT;
use inventory_reports::{logging, Config, ConfigOverrides, InventoryError, Pipeline};
use std::path::PathBuf;
use tracing::{error, warn};

#[derive(Parser)]
#[command(name = "inventory_reports")]
#[command(about = "Join inventory lists and generate the four inventory reports")]
#[command(version)]
struct Cli {
    /// TOML config file (defaults to ./inventory.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Manufacturer list: item id, manufacturer, item type, optional damage marker
    #[arg(long)]
    manufacturers: Option<PathBuf>,

    /// Price list: item id, price
    #[arg(long)]
    prices: Option<PathBuf>,

    /// Service date list: item id, MM/DD/YYYY
    #[arg(long)]
    service_dates: Option<PathBuf>,

    /// Directory the four reports are written to (created if missing)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Damage marker text matched case-insensitively in the fourth manufacturer column
    #[arg(long)]
    damaged_marker: Option<String>,

    /// Also write JSON logs to a daily rolling file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Evaluate past-due service dates as of this day (MM/DD/YYYY) instead of now
    #[arg(long, value_parser = parse_as_of)]
    as_of: Option<NaiveDate>,
}

fn parse_as_of(value: &str) -> Result<NaiveDate, InventoryError> {
    NaiveDate::parse_from_str(value.trim(), SERVICE_DATE_FORMAT)
        .map_err(|_| InventoryError::InvalidDate(value.to_string()))
}

/// Start of the day after `date`, so every service date up to and including it is past due
fn end_of_day(date: NaiveDate) -> anyhow::Result<NaiveDateTime> {
    date.succ_opt()
        .and_then(|next| next.and_hms_opt(0, 0, 0))
        .with_context(|| format!("--as-of date {} is out of range", date))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::resolve(cli.config.as_deref())?.apply_overrides(ConfigOverrides {
        manufacturers: cli.manufacturers,
        prices: cli.prices,
        service_dates: cli.service_dates,
        output_dir: cli.output_dir,
        damaged_marker: cli.damaged_marker,
        log_dir: cli.log_dir,
    })?;

    // Keep the guard alive so file logs are flushed on exit
    let _log_guard = logging::init_logging(config.logging.dir.as_deref());

    let as_of = match cli.as_of {
        Some(date) => end_of_day(date)?,
        None => Local::now().naive_local(),
    };

    match Pipeline::run(&config, as_of) {
        Ok(result) => {
            if !result.warnings.is_empty() {
                warn!(
                    "{} rows had unparseable prices or service dates and were left blank",
                    result.warnings.len()
                );
            }
            Ok(())
        }
        Err(e) => {
            error!("Pipeline failed: {}", e);
            Err(e.into())
        }
    }
}
