//! Exponentially recency-weighted moving average.
//!
//! For a series of length n, point i (0-based, oldest first) gets weight
//! `exp((i / n) * recency_bias * sharpness)`. The default sharpness of 3
//! concentrates influence on roughly the latest third of the history.

use crate::domain::estimator::recency_weighted_mean;
use crate::domain::sales::TimeSeriesPoint;

pub const DEFAULT_RECENCY_BIAS: f64 = 0.7;
pub const DEFAULT_SHARPNESS: f64 = 3.0;

pub fn weighted_moving_average(points: &[TimeSeriesPoint], recency_bias: f64) -> f64 {
    weighted_moving_average_with(points, recency_bias, DEFAULT_SHARPNESS)
}

pub fn weighted_moving_average_with(
    points: &[TimeSeriesPoint],
    recency_bias: f64,
    sharpness: f64,
) -> f64 {
    recency_weighted_mean(
        points.iter().map(|p| p.quantity),
        points.len(),
        recency_bias * sharpness,
    )
}
