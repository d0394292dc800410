//! Record grouping and time-series normalization.
//!
//! Grouping partitions a flat batch by item; normalization sorts one item's
//! records by date and annotates each point with its weekday and day offset.

use std::collections::BTreeMap;

use crate::domain::sales::{weekday_index, SalesRecord, TimeSeriesPoint};

/// Partition records by item. Per-item order matches input order; nothing is
/// filtered, so zero quantities and duplicate dates pass through.
pub fn group_by_item(records: &[SalesRecord]) -> BTreeMap<String, Vec<SalesRecord>> {
    let mut groups: BTreeMap<String, Vec<SalesRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.item.clone())
            .or_default()
            .push(record.clone());
    }
    groups
}

/// Sort one item's records ascending by date and derive the point annotations.
///
/// Same-date records are ordered by quantity so that input order never
/// changes the series. `days_since_start` is `(date - first_date) + 1`, so the
/// earliest point is 1.
pub fn normalize(records: &[SalesRecord]) -> Vec<TimeSeriesPoint> {
    let mut sorted: Vec<&SalesRecord> = records.iter().collect();
    sorted.sort_by_key(|r| (r.date, r.quantity));

    let Some(first) = sorted.first().map(|r| r.date) else {
        return Vec::new();
    };

    sorted
        .into_iter()
        .map(|r| TimeSeriesPoint {
            date: r.date,
            quantity: r.quantity as f64,
            day_of_week: weekday_index(r.date),
            days_since_start: (r.date - first).num_days() + 1,
        })
        .collect()
}

/// Unweighted mean of the point quantities; 0 for an empty series.
pub fn mean_quantity(points: &[TimeSeriesPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.quantity).sum::<f64>() / points.len() as f64
}
