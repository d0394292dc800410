//! CLI definition and dispatch.

use chrono::{Days, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::config_validation::{
    parse_target_date, read_weights, validate_data_config, validate_forecast_config,
    DEFAULT_LOOKBACK_DAYS,
};
use crate::domain::error::DemandcastError;
use crate::domain::forecast::{advanced_forecast_with, default_target_date, ForecastConfig};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::SalesDataPort;
use crate::ports::report_port::ForecastReportPort;

#[derive(Parser, Debug)]
#[command(name = "demandcast", about = "Next-day demand forecasting for restaurant menus")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Forecast next-day quantities for every item at a location
    Forecast {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        location: Option<String>,
        /// Day to forecast (YYYY-MM-DD), defaults to tomorrow
        #[arg(short, long)]
        target_date: Option<NaiveDate>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// List locations with sales history
    ListLocations {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the stored date range for location(s)
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Import a sales CSV into the SQLite store
    #[cfg(feature = "sqlite")]
    Import {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        csv: PathBuf,
        #[arg(short, long)]
        location: String,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Forecast {
            config,
            location,
            target_date,
            output,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config, location.as_deref(), target_date)
            } else {
                run_forecast(&config, location.as_deref(), target_date, output)
            }
        }
        Command::ListLocations { config } => run_list_locations(&config),
        Command::Info { config, location } => run_info(&config, location.as_deref()),
        Command::Validate { config } => run_validate(&config),
        #[cfg(feature = "sqlite")]
        Command::Import {
            config,
            csv,
            location,
        } => run_import(&config, &csv, &location),
    }
}

fn fail(err: DemandcastError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    tracing::info!("loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(fail)
}

pub fn build_forecast_config(config: &dyn ConfigPort) -> ForecastConfig {
    let defaults = ForecastConfig::default();
    ForecastConfig {
        recency_bias: config.get_double("forecast", "recency_bias", defaults.recency_bias),
        alpha: config.get_double("forecast", "alpha", defaults.alpha),
        wma_sharpness: config.get_double("forecast", "wma_sharpness", defaults.wma_sharpness),
        weekday_sharpness: config.get_double(
            "forecast",
            "weekday_sharpness",
            defaults.weekday_sharpness,
        ),
        weights: read_weights(config),
    }
}

pub fn resolve_location(location_override: Option<&str>, config: &dyn ConfigPort) -> Option<String> {
    location_override
        .map(str::to_string)
        .or_else(|| config.get_string("data", "location"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// CLI override, then `[forecast] target_date`, then tomorrow.
pub fn resolve_target_date(
    target_override: Option<NaiveDate>,
    config: &dyn ConfigPort,
) -> Result<NaiveDate, DemandcastError> {
    if let Some(date) = target_override {
        return Ok(date);
    }
    Ok(parse_target_date(config)?.unwrap_or_else(default_target_date))
}

/// Inclusive history window ending the day before `target`.
pub fn history_window(target: NaiveDate, lookback_days: i64) -> (NaiveDate, NaiveDate) {
    let lookback = lookback_days.max(1) as u64;
    let end = target.checked_sub_days(Days::new(1)).unwrap_or(target);
    let start = end
        .checked_sub_days(Days::new(lookback - 1))
        .unwrap_or(NaiveDate::MIN);
    (start, end)
}

pub fn open_data_port(config: &dyn ConfigPort) -> Result<Box<dyn SalesDataPort>, DemandcastError> {
    validate_data_config(config)?;
    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "csv".to_string())
        .trim()
        .to_lowercase();

    match source.as_str() {
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            use crate::adapters::sqlite_adapter::SqliteAdapter;
            let adapter = SqliteAdapter::from_config(config)?;
            adapter.initialize_schema()?;
            Ok(Box::new(adapter))
        }
        #[cfg(not(feature = "sqlite"))]
        "sqlite" => Err(DemandcastError::invalid(
            "data",
            "source",
            "sqlite feature is not enabled",
        )),
        _ => {
            let dir = config.get_string("data", "csv_dir").unwrap_or_default();
            Ok(Box::new(CsvAdapter::new(PathBuf::from(dir.trim()))))
        }
    }
}

fn run_forecast(
    config_path: &PathBuf,
    location_override: Option<&str>,
    target_override: Option<NaiveDate>,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_forecast_config(&config) {
        return fail(e);
    }

    let Some(location) = resolve_location(location_override, &config) else {
        return fail(DemandcastError::ConfigMissing {
            section: "data".into(),
            key: "location".into(),
        });
    };

    let target = match resolve_target_date(target_override, &config) {
        Ok(t) => t,
        Err(e) => return fail(e),
    };

    let data_port = match open_data_port(&config) {
        Ok(p) => p,
        Err(e) => return fail(e),
    };

    let report = TextReportAdapter::from_config(&config, output);
    let lookback = config.get_int("forecast", "lookback_days", DEFAULT_LOOKBACK_DAYS);

    run_forecast_pipeline(
        data_port.as_ref(),
        &report,
        &build_forecast_config(&config),
        &location,
        target,
        lookback,
    )
}

/// Fetch history, forecast and deliver.
pub fn run_forecast_pipeline(
    data_port: &dyn SalesDataPort,
    report: &dyn ForecastReportPort,
    forecast_config: &ForecastConfig,
    location: &str,
    target: NaiveDate,
    lookback_days: i64,
) -> ExitCode {
    let (start, end) = history_window(target, lookback_days);
    tracing::info!(location, %start, %end, %target, "fetching sales history");

    let records = match data_port.fetch_sales(location, start, end) {
        Ok(r) => r,
        Err(e) => return fail(e),
    };

    if records.is_empty() {
        return fail(DemandcastError::NoData {
            location: location.to_string(),
        });
    }

    let result = advanced_forecast_with(&records, target, forecast_config);
    tracing::info!(records = records.len(), items = result.len(), "forecast complete");

    match report.deliver(&result, target, location) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

pub fn run_dry_run(
    config_path: &PathBuf,
    location_override: Option<&str>,
    target_override: Option<NaiveDate>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_forecast_config(&config).and_then(|_| validate_data_config(&config)) {
        return fail(e);
    }

    let target = match resolve_target_date(target_override, &config) {
        Ok(t) => t,
        Err(e) => return fail(e),
    };
    let lookback = config.get_int("forecast", "lookback_days", DEFAULT_LOOKBACK_DAYS);
    let (start, end) = history_window(target, lookback);
    let fc = build_forecast_config(&config);
    let location = resolve_location(location_override, &config);

    println!("Dry run: configuration is valid");
    println!(
        "  location:      {}",
        location.as_deref().unwrap_or("(not set)")
    );
    println!("  target date:   {}", target);
    println!("  history:       {} .. {}", start, end);
    println!("  recency bias:  {}", fc.recency_bias);
    println!("  alpha:         {}", fc.alpha);
    println!(
        "  weights:       wma={} ses={} dow={} trend={}",
        fc.weights.moving_average,
        fc.weights.exponential_smoothing,
        fc.weights.day_of_week,
        fc.weights.linear_trend
    );
    ExitCode::SUCCESS
}

fn run_list_locations(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let data_port = match open_data_port(&config) {
        Ok(p) => p,
        Err(e) => return fail(e),
    };

    let locations = match data_port.list_locations() {
        Ok(l) => l,
        Err(e) => return fail(e),
    };

    if locations.is_empty() {
        eprintln!("No locations found");
    } else {
        for location in &locations {
            println!("{}", location);
        }
        eprintln!("{} locations found", locations.len());
    }
    ExitCode::SUCCESS
}

fn run_info(config_path: &PathBuf, location: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let data_port = match open_data_port(&config) {
        Ok(p) => p,
        Err(e) => return fail(e),
    };

    let locations = match location {
        Some(l) => vec![l.to_string()],
        None => match data_port.list_locations() {
            Ok(l) => l,
            Err(e) => return fail(e),
        },
    };

    for location in &locations {
        match data_port.get_data_range(location) {
            Ok(Some((first, last, count))) => {
                println!("{location}: {first} to {last} ({count} records)");
            }
            Ok(None) => println!("{location}: no data"),
            Err(e) => return fail(e),
        }
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let mut errors = Vec::new();
    if let Err(e) = validate_forecast_config(&config) {
        errors.push(e);
    }
    if let Err(e) = validate_data_config(&config) {
        errors.push(e);
    }

    match errors.first() {
        None => {
            println!("Configuration is valid");
            ExitCode::SUCCESS
        }
        Some(first) => {
            for e in &errors {
                eprintln!("error: {e}");
            }
            first.into()
        }
    }
}

#[cfg(feature = "sqlite")]
fn run_import(config_path: &PathBuf, csv_path: &PathBuf, location: &str) -> ExitCode {
    use crate::adapters::csv_adapter::load_sales_file;
    use crate::adapters::sqlite_adapter::SqliteAdapter;

    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let adapter = match SqliteAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };

    let imported = load_sales_file(csv_path)
        .and_then(|records| {
            adapter.initialize_schema()?;
            adapter.insert_records(location, &records)
        });

    match imported {
        Ok(count) => {
            println!("Imported {count} records for {location}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
