//! Sales observation and derived time-series point types.

use chrono::{Datelike, NaiveDate};

/// One observed sale total for an item on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub item: String,
    pub quantity: u64,
}

impl SalesRecord {
    pub fn new(date: NaiveDate, item: impl Into<String>, quantity: u64) -> Self {
        Self {
            date,
            item: item.into(),
            quantity,
        }
    }
}

/// A chronologically positioned observation of a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub quantity: f64,
    /// 0 = Sunday ... 6 = Saturday
    pub day_of_week: u32,
    /// 1-based offset in days from the first observation of the item.
    pub days_since_start: i64,
}

/// Weekday index with Sunday as 0.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}
