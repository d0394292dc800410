//! Single exponential smoothing.
//!
//! S_0 = q_0, S_i = alpha * q_i + (1 - alpha) * S_{i-1}; the final level is the
//! one-step-ahead forecast.

use crate::domain::sales::TimeSeriesPoint;

pub const DEFAULT_ALPHA: f64 = 0.3;

pub fn exponential_smoothing(points: &[TimeSeriesPoint], alpha: f64) -> f64 {
    let Some((first, rest)) = points.split_first() else {
        return 0.0;
    };

    rest.iter().fold(first.quantity, |level, point| {
        alpha * point.quantity + (1.0 - alpha) * level
    })
}
