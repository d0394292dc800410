//! Forecast orchestration: group, normalize, estimate, combine.
//!
//! Each item is forecast independently from its own sorted series. The
//! engine never fails; items whose series is empty forecast 0.

use std::collections::BTreeMap;

use chrono::{Days, Local, NaiveDate};

use crate::domain::ensemble::EnsembleWeights;
use crate::domain::estimator::day_of_week::{self, day_of_week_pattern};
use crate::domain::estimator::exp_smoothing::{self, exponential_smoothing};
use crate::domain::estimator::linear_trend::linear_trend;
use crate::domain::estimator::wma::{self, weighted_moving_average_with};
use crate::domain::estimator::EstimatorOutputs;
use crate::domain::sales::{weekday_index, SalesRecord, TimeSeriesPoint};
use crate::domain::series::{group_by_item, normalize};

/// Predicted quantity per item.
pub type ForecastResult = BTreeMap<String, u64>;

/// Tunable constants of the ensemble. `Default` matches the calibrated values.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    pub recency_bias: f64,
    pub alpha: f64,
    pub wma_sharpness: f64,
    pub weekday_sharpness: f64,
    pub weights: EnsembleWeights,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            recency_bias: wma::DEFAULT_RECENCY_BIAS,
            alpha: exp_smoothing::DEFAULT_ALPHA,
            wma_sharpness: wma::DEFAULT_SHARPNESS,
            weekday_sharpness: day_of_week::DEFAULT_SHARPNESS,
            weights: EnsembleWeights::default(),
        }
    }
}

/// Full breakdown of one item's forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemForecast {
    pub item: String,
    pub observations: usize,
    pub outputs: EstimatorOutputs,
    pub quantity: u64,
}

/// Tomorrow's date in the local timezone.
pub fn default_target_date() -> NaiveDate {
    let today = Local::now().date_naive();
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}

/// Run every estimator over a normalized series.
pub fn estimate(
    points: &[TimeSeriesPoint],
    target_day: u32,
    config: &ForecastConfig,
) -> EstimatorOutputs {
    EstimatorOutputs {
        moving_average: weighted_moving_average_with(
            points,
            config.recency_bias,
            config.wma_sharpness,
        ),
        exponential_smoothing: exponential_smoothing(points, config.alpha),
        day_of_week: day_of_week_pattern(points, target_day, config.weekday_sharpness),
        linear_trend: linear_trend(points),
    }
}

/// Per-item forecasts with estimator outputs, ordered by item name.
pub fn forecast_items(
    records: &[SalesRecord],
    target_date: NaiveDate,
    config: &ForecastConfig,
) -> Vec<ItemForecast> {
    let target_day = weekday_index(target_date);

    group_by_item(records)
        .into_iter()
        .map(|(item, item_records)| {
            let points = normalize(&item_records);
            if points.is_empty() {
                return ItemForecast {
                    item,
                    observations: 0,
                    outputs: EstimatorOutputs::default(),
                    quantity: 0,
                };
            }

            let outputs = estimate(&points, target_day, config);
            let quantity = config.weights.combine(&outputs);
            tracing::debug!(
                item = %item,
                observations = points.len(),
                %outputs,
                quantity,
                "item forecast"
            );

            ItemForecast {
                item,
                observations: points.len(),
                outputs,
                quantity,
            }
        })
        .collect()
}

pub fn advanced_forecast_with(
    records: &[SalesRecord],
    target_date: NaiveDate,
    config: &ForecastConfig,
) -> ForecastResult {
    forecast_items(records, target_date, config)
        .into_iter()
        .map(|f| (f.item, f.quantity))
        .collect()
}

/// Forecast every item in `records` for `target_date`, or tomorrow when absent.
pub fn advanced_forecast(
    records: &[SalesRecord],
    target_date: Option<NaiveDate>,
) -> ForecastResult {
    let target = target_date.unwrap_or_else(default_target_date);
    advanced_forecast_with(records, target, &ForecastConfig::default())
}
