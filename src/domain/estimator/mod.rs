//! Time-series estimators used by the forecasting ensemble.
//!
//! Every estimator is a free function over a chronologically sorted
//! `TimeSeriesPoint` slice and returns a single scalar. None of them fail:
//! degenerate inputs collapse to 0, the series mean, or the lone observation.
//!
//! - `wma`: exponential recency-weighted moving average
//! - `exp_smoothing`: single exponential smoothing
//! - `day_of_week`: same-weekday recency-weighted average
//! - `linear_trend`: least-squares line extrapolated one day ahead

pub mod day_of_week;
pub mod exp_smoothing;
pub mod linear_trend;
pub mod wma;

use std::fmt;

/// Raw outputs of the four estimators for one item.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EstimatorOutputs {
    pub moving_average: f64,
    pub exponential_smoothing: f64,
    pub day_of_week: f64,
    pub linear_trend: f64,
}

impl fmt::Display for EstimatorOutputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WMA={:.3} SES={:.3} DOW={:.3} TREND={:.3}",
            self.moving_average, self.exponential_smoothing, self.day_of_week, self.linear_trend
        )
    }
}

/// Weighted average where the weight of position `i` out of `len` is
/// `exp((i / len) * scale)`. Returns 0 for an empty input.
pub(crate) fn recency_weighted_mean<I>(quantities: I, len: usize, scale: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    if len == 0 {
        return 0.0;
    }

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for (i, quantity) in quantities.into_iter().enumerate() {
        let weight = ((i as f64 / len as f64) * scale).exp();
        weighted_sum += quantity * weight;
        weight_total += weight;
    }

    if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recency_weighted_mean_zero_scale_is_plain_mean() {
        let v = recency_weighted_mean([2.0, 4.0, 6.0], 3, 0.0);
        assert_relative_eq!(v, 4.0);
    }

    #[test]
    fn recency_weighted_mean_favours_recent() {
        let v = recency_weighted_mean([0.0, 10.0], 2, 2.0);
        // weights 1 and e
        let e = std::f64::consts::E;
        assert_relative_eq!(v, 10.0 * e / (1.0 + e), epsilon = 1e-12);
        assert!(v > 5.0);
    }

    #[test]
    fn recency_weighted_mean_empty() {
        assert_eq!(recency_weighted_mean(std::iter::empty::<f64>(), 0, 3.0), 0.0);
    }

    #[test]
    fn outputs_display() {
        let outputs = EstimatorOutputs {
            moving_average: 1.0,
            exponential_smoothing: 2.5,
            day_of_week: 3.0,
            linear_trend: 4.25,
        };
        assert_eq!(
            outputs.to_string(),
            "WMA=1.000 SES=2.500 DOW=3.000 TREND=4.250"
        );
    }
}
