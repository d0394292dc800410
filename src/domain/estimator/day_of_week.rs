//! Same-weekday recency-weighted average.
//!
//! Only points falling on the target weekday contribute. Within that subset of
//! length m, filtered position j is weighted `exp((j / m) * sharpness)`. When
//! the weekday has never been observed the plain mean of the whole series is
//! used instead.

use crate::domain::estimator::recency_weighted_mean;
use crate::domain::sales::TimeSeriesPoint;
use crate::domain::series::mean_quantity;

pub const DEFAULT_SHARPNESS: f64 = 2.0;

/// `target_day` uses the Sunday = 0 convention of `TimeSeriesPoint::day_of_week`.
pub fn day_of_week_pattern(points: &[TimeSeriesPoint], target_day: u32, sharpness: f64) -> f64 {
    let matching: Vec<f64> = points
        .iter()
        .filter(|p| p.day_of_week == target_day)
        .map(|p| p.quantity)
        .collect();

    if matching.is_empty() {
        return mean_quantity(points);
    }

    let len = matching.len();
    recency_weighted_mean(matching, len, sharpness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sales::SalesRecord;
    use crate::domain::series::normalize;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    // 2024-01-01 was a Monday (index 1)
    fn make_points(quantities: &[u64]) -> Vec<TimeSeriesPoint> {
        let records: Vec<SalesRecord> = quantities
            .iter()
            .enumerate()
            .map(|(i, &q)| {
                SalesRecord::new(
                    NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                    "TEST",
                    q,
                )
            })
            .collect();
        normalize(&records)
    }

    #[test]
    fn dow_empty_series() {
        assert_eq!(day_of_week_pattern(&[], 3, DEFAULT_SHARPNESS), 0.0);
    }

    #[test]
    fn dow_single_match() {
        let points = make_points(&[10, 12, 11, 13, 12, 14, 13]);
        // only Jan 1 is a Monday
        assert_relative_eq!(day_of_week_pattern(&points, 1, DEFAULT_SHARPNESS), 10.0);
    }

    #[test]
    fn dow_weights_recent_matches() {
        // Mondays: Jan 1 = 10, Jan 8 = 20
        let mut quantities = vec![0u64; 8];
        quantities[0] = 10;
        quantities[7] = 20;
        let points = make_points(&quantities);

        let e = std::f64::consts::E;
        let expected = (10.0 + 20.0 * e) / (1.0 + e);
        assert_relative_eq!(
            day_of_week_pattern(&points, 1, DEFAULT_SHARPNESS),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn dow_falls_back_to_mean() {
        // Mon..Wed only, target Saturday (6)
        let points = make_points(&[3, 6, 9]);
        assert_relative_eq!(day_of_week_pattern(&points, 6, DEFAULT_SHARPNESS), 6.0);
    }

    #[test]
    fn dow_ignores_other_weekdays() {
        let points = make_points(&[5, 100, 100, 100, 100, 100, 100, 5]);
        assert_relative_eq!(
            day_of_week_pattern(&points, 1, DEFAULT_SHARPNESS),
            5.0,
            epsilon = 1e-12
        );
    }
}
