//! Ordinary least-squares trend on `days_since_start`.
//!
//! slope = (n*Sxy - Sx*Sy) / (n*Sxx - Sx^2), intercept = (Sy - slope*Sx) / n.
//! The fitted line is evaluated one day past the last observed offset.

use crate::domain::sales::TimeSeriesPoint;
use crate::domain::series::mean_quantity;

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Closed-form least-squares fit. `None` when fewer than two points are given
/// or every x is identical (zero denominator).
pub fn fit_line(points: &[TimeSeriesPoint]) -> Option<Line> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for p in points {
        let x = p.days_since_start as f64;
        let y = p.quantity;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Some(Line { slope, intercept })
}

pub fn linear_trend(points: &[TimeSeriesPoint]) -> f64 {
    match points {
        [] => 0.0,
        [only] => only.quantity,
        [.., last] => match fit_line(points) {
            Some(line) => line.at((last.days_since_start + 1) as f64),
            None => mean_quantity(points),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sales::SalesRecord;
    use crate::domain::series::normalize;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

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
    fn trend_empty() {
        assert_eq!(linear_trend(&[]), 0.0);
    }

    #[test]
    fn trend_single_point() {
        let points = make_points(&[5]);
        assert_relative_eq!(linear_trend(&points), 5.0);
    }

    #[test]
    fn trend_perfect_line() {
        let points = make_points(&[2, 4, 6, 8]);
        let line = fit_line(&points).unwrap();
        assert_relative_eq!(line.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(line.intercept, 0.0, epsilon = 1e-12);
        assert_relative_eq!(linear_trend(&points), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn trend_known_regression() {
        let points = make_points(&[10, 12, 11, 13, 12, 14, 13]);
        let line = fit_line(&points).unwrap();
        // Sx=28 Sy=85 Sxy=354 Sxx=140 n=7
        assert_relative_eq!(line.slope, 0.5, epsilon = 1e-12);
        assert_relative_eq!(line.intercept, 71.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(linear_trend(&points), 4.0 + 71.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn trend_duplicate_dates_use_mean() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let points = normalize(&[
            SalesRecord::new(date, "Soup", 7),
            SalesRecord::new(date, "Soup", 9),
        ]);
        assert!(fit_line(&points).is_none());
        assert_relative_eq!(linear_trend(&points), 8.0);
    }

    #[test]
    fn trend_can_go_negative() {
        let points = make_points(&[9, 6, 3, 0]);
        assert!(linear_trend(&points) < 0.0);
    }

    #[test]
    fn trend_irregular_gaps_use_offsets() {
        let points = normalize(&[
            SalesRecord::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "A", 1),
            SalesRecord::new(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), "A", 3),
        ]);
        // x = 1, 3; y = x, so next day after x=3 is 4
        assert_relative_eq!(linear_trend(&points), 4.0, epsilon = 1e-12);
    }
}
