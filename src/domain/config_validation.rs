//! Configuration validation.
//!
//! Validates forecast and data-source settings before any history is loaded.
//! Missing forecast keys fall back to their calibrated defaults.

use crate::domain::ensemble::EnsembleWeights;
use crate::domain::error::DemandcastError;
use crate::domain::forecast::ForecastConfig;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

const WEIGHT_TOLERANCE: f64 = 1e-6;

pub const DEFAULT_LOOKBACK_DAYS: i64 = 90;

pub fn validate_forecast_config(config: &dyn ConfigPort) -> Result<(), DemandcastError> {
    validate_alpha(config)?;
    validate_non_negative(config, "recency_bias", ForecastConfig::default().recency_bias)?;
    validate_non_negative(config, "wma_sharpness", ForecastConfig::default().wma_sharpness)?;
    validate_non_negative(
        config,
        "weekday_sharpness",
        ForecastConfig::default().weekday_sharpness,
    )?;
    validate_weights(config)?;
    validate_lookback(config)?;
    validate_target_date(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), DemandcastError> {
    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "csv".to_string());

    match source.trim().to_lowercase().as_str() {
        "csv" => require_non_empty(config, "data", "csv_dir"),
        "sqlite" => require_non_empty(config, "sqlite", "path"),
        other => Err(DemandcastError::invalid(
            "data",
            "source",
            format!("unknown source '{other}', expected csv or sqlite"),
        )),
    }
}

/// Reads the ensemble weights, defaulting each missing key.
pub fn read_weights(config: &dyn ConfigPort) -> EnsembleWeights {
    let defaults = EnsembleWeights::default();
    EnsembleWeights {
        moving_average: config.get_double(
            "forecast",
            "weight_moving_average",
            defaults.moving_average,
        ),
        exponential_smoothing: config.get_double(
            "forecast",
            "weight_exponential_smoothing",
            defaults.exponential_smoothing,
        ),
        day_of_week: config.get_double("forecast", "weight_day_of_week", defaults.day_of_week),
        linear_trend: config.get_double("forecast", "weight_linear_trend", defaults.linear_trend),
    }
}

/// Parses `[forecast] target_date` if present.
pub fn parse_target_date(config: &dyn ConfigPort) -> Result<Option<NaiveDate>, DemandcastError> {
    match config.get_string("forecast", "target_date") {
        Some(s) if !s.trim().is_empty() => parse_date(s.trim(), "forecast", "target_date").map(Some),
        _ => Ok(None),
    }
}

pub fn parse_date(value: &str, section: &str, key: &str) -> Result<NaiveDate, DemandcastError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        DemandcastError::invalid(
            section,
            key,
            format!("invalid {key} format, expected YYYY-MM-DD"),
        )
    })
}

fn validate_alpha(config: &dyn ConfigPort) -> Result<(), DemandcastError> {
    let value = config.get_double("forecast", "alpha", ForecastConfig::default().alpha);
    if !(value > 0.0 && value <= 1.0) {
        return Err(DemandcastError::invalid(
            "forecast",
            "alpha",
            "alpha must be in (0, 1]",
        ));
    }
    Ok(())
}

fn validate_non_negative(
    config: &dyn ConfigPort,
    key: &str,
    default: f64,
) -> Result<(), DemandcastError> {
    let value = config.get_double("forecast", key, default);
    if !value.is_finite() || value < 0.0 {
        return Err(DemandcastError::invalid(
            "forecast",
            key,
            format!("{key} must be non-negative"),
        ));
    }
    Ok(())
}

fn validate_weights(config: &dyn ConfigPort) -> Result<(), DemandcastError> {
    let weights = read_weights(config);
    let named = [
        ("weight_moving_average", weights.moving_average),
        ("weight_exponential_smoothing", weights.exponential_smoothing),
        ("weight_day_of_week", weights.day_of_week),
        ("weight_linear_trend", weights.linear_trend),
    ];
    for (key, value) in named {
        if !value.is_finite() || value < 0.0 {
            return Err(DemandcastError::invalid(
                "forecast",
                key,
                format!("{key} must be non-negative"),
            ));
        }
    }

    let sum = weights.sum();
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(DemandcastError::invalid(
            "forecast",
            "weights",
            format!("ensemble weights must sum to 1.0, got {sum:.6}"),
        ));
    }
    Ok(())
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), DemandcastError> {
    let value = config.get_int("forecast", "lookback_days", DEFAULT_LOOKBACK_DAYS);
    if value < 1 {
        return Err(DemandcastError::invalid(
            "forecast",
            "lookback_days",
            "lookback_days must be at least 1",
        ));
    }
    Ok(())
}

fn validate_target_date(config: &dyn ConfigPort) -> Result<(), DemandcastError> {
    parse_target_date(config).map(|_| ())
}

fn require_non_empty(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), DemandcastError> {
    match config.get_string(section, key) {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(DemandcastError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
    }
}
