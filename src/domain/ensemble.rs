//! Fixed-weight ensemble of the four estimator outputs.

use crate::domain::estimator::EstimatorOutputs;

/// Linear combination weights, one per estimator. The defaults sum to 1.0;
/// configuration validation rejects sets that do not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnsembleWeights {
    pub moving_average: f64,
    pub exponential_smoothing: f64,
    pub day_of_week: f64,
    pub linear_trend: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            moving_average: 0.30,
            exponential_smoothing: 0.30,
            day_of_week: 0.25,
            linear_trend: 0.15,
        }
    }
}

impl EnsembleWeights {
    pub fn sum(&self) -> f64 {
        self.moving_average + self.exponential_smoothing + self.day_of_week + self.linear_trend
    }

    /// Weighted sum before rounding.
    pub fn blend(&self, outputs: &EstimatorOutputs) -> f64 {
        self.moving_average * outputs.moving_average
            + self.exponential_smoothing * outputs.exponential_smoothing
            + self.day_of_week * outputs.day_of_week
            + self.linear_trend * outputs.linear_trend
    }

    /// `max(0, round(blend))`. A non-finite blend yields 0.
    pub fn combine(&self, outputs: &EstimatorOutputs) -> u64 {
        let blended = self.blend(outputs);
        if !blended.is_finite() {
            return 0;
        }
        blended.round().max(0.0) as u64
    }
}
