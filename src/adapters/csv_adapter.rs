//! CSV file sales adapter.
//!
//! One file per location, `<base_path>/<location>.csv`, with the header
//! `date,item,quantity`.

use crate::domain::error::DemandcastError;
use crate::domain::sales::SalesRecord;
use crate::ports::data_port::SalesDataPort;
use chrono::NaiveDate;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, location: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", location))
    }

    fn read_location(&self, location: &str) -> Result<Vec<SalesRecord>, DemandcastError> {
        let path = self.csv_path(location);
        let file = fs::File::open(&path).map_err(|e| DemandcastError::Database {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        parse_sales_csv(file)
    }
}

/// Parse `date,item,quantity` rows. Line numbers in errors are 1-based data
/// rows (the header is not counted).
pub fn parse_sales_csv<R: Read>(reader: R) -> Result<Vec<SalesRecord>, DemandcastError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 1;
        let row = result.map_err(|e| DemandcastError::InvalidRecord {
            line,
            reason: format!("CSV parse error: {}", e),
        })?;

        let date_str = row.get(0).ok_or_else(|| DemandcastError::InvalidRecord {
            line,
            reason: "missing date column".into(),
        })?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            DemandcastError::InvalidRecord {
                line,
                reason: format!("invalid date '{}': {}", date_str, e),
            }
        })?;

        let item = row
            .get(1)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DemandcastError::InvalidRecord {
                line,
                reason: "missing item column".into(),
            })?;

        let quantity_str = row.get(2).ok_or_else(|| DemandcastError::InvalidRecord {
            line,
            reason: "missing quantity column".into(),
        })?;
        let quantity: u64 = quantity_str
            .parse()
            .map_err(|e| DemandcastError::InvalidRecord {
                line,
                reason: format!("invalid quantity '{}': {}", quantity_str, e),
            })?;

        records.push(SalesRecord::new(date, item, quantity));
    }

    Ok(records)
}

/// Load every record of a standalone CSV file.
pub fn load_sales_file(path: &Path) -> Result<Vec<SalesRecord>, DemandcastError> {
    let file = fs::File::open(path)?;
    parse_sales_csv(file)
}

impl SalesDataPort for CsvAdapter {
    fn fetch_sales(
        &self,
        location: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SalesRecord>, DemandcastError> {
        let mut records: Vec<SalesRecord> = self
            .read_location(location)?
            .into_iter()
            .filter(|r| r.date >= start_date && r.date <= end_date)
            .collect();

        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.item.cmp(&b.item)));
        tracing::debug!(location, count = records.len(), "loaded sales from CSV");
        Ok(records)
    }

    fn list_locations(&self) -> Result<Vec<String>, DemandcastError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| DemandcastError::Database {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut locations = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| DemandcastError::Database {
                reason: format!("directory entry error: {}", e),
            })?;

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                locations.push(stem.to_string());
            }
        }

        locations.sort();
        Ok(locations)
    }

    fn get_data_range(
        &self,
        location: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DemandcastError> {
        if !self.csv_path(location).exists() {
            return Ok(None);
        }
        let records = self.read_location(location)?;
        let min = records.iter().map(|r| r.date).min();
        let max = records.iter().map(|r| r.date).max();
        Ok(min.zip(max).map(|(min, max)| (min, max, records.len())))
    }
}
