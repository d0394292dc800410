#![allow(dead_code)]

use chrono::NaiveDate;
use demandcast::domain::error::DemandcastError;
use demandcast::domain::forecast::ForecastResult;
pub use demandcast::domain::sales::SalesRecord;
use demandcast::ports::data_port::SalesDataPort;
use demandcast::ports::report_port::ForecastReportPort;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<SalesRecord>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_records(mut self, location: &str, records: Vec<SalesRecord>) -> Self {
        self.data.insert(location.to_string(), records);
        self
    }

    pub fn with_error(mut self, location: &str, reason: &str) -> Self {
        self.errors.insert(location.to_string(), reason.to_string());
        self
    }
}

impl SalesDataPort for MockDataPort {
    fn fetch_sales(
        &self,
        location: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SalesRecord>, DemandcastError> {
        if let Some(reason) = self.errors.get(location) {
            return Err(DemandcastError::Database {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(location)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.date >= start_date && r.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_locations(&self) -> Result<Vec<String>, DemandcastError> {
        let mut locations: Vec<String> = self.data.keys().cloned().collect();
        locations.sort();
        Ok(locations)
    }

    fn get_data_range(
        &self,
        location: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DemandcastError> {
        match self.data.get(location) {
            Some(records) if !records.is_empty() => {
                let min = records.iter().map(|r| r.date).min().unwrap();
                let max = records.iter().map(|r| r.date).max().unwrap();
                Ok(Some((min, max, records.len())))
            }
            _ => Ok(None),
        }
    }
}

/// Captures delivered forecasts instead of printing them.
pub struct RecordingReport {
    pub delivered: RefCell<Vec<(ForecastResult, NaiveDate, String)>>,
}

impl RecordingReport {
    pub fn new() -> Self {
        Self {
            delivered: RefCell::new(Vec::new()),
        }
    }
}

impl ForecastReportPort for RecordingReport {
    fn deliver(
        &self,
        result: &ForecastResult,
        target_date: NaiveDate,
        location: &str,
    ) -> Result<(), DemandcastError> {
        self.delivered
            .borrow_mut()
            .push((result.clone(), target_date, location.to_string()));
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_record(item: &str, date: &str, quantity: u64) -> SalesRecord {
    SalesRecord::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        item,
        quantity,
    )
}

/// One record per consecutive day starting at `start_date`.
pub fn daily_series(item: &str, start_date: &str, quantities: &[u64]) -> Vec<SalesRecord> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    quantities
        .iter()
        .enumerate()
        .map(|(i, &q)| SalesRecord::new(start + chrono::Duration::days(i as i64), item, q))
        .collect()
}
