//! SQLite sales adapter.

use crate::domain::error::DemandcastError;
use crate::domain::sales::SalesRecord;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::SalesDataPort;
use chrono::NaiveDate;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

pub struct SqliteAdapter {
    pool: Pool<SqliteConnectionManager>,
}

fn pool_error(e: r2d2::Error) -> DemandcastError {
    DemandcastError::Database {
        reason: e.to_string(),
    }
}

fn query_error(e: rusqlite::Error) -> DemandcastError {
    DemandcastError::DatabaseQuery {
        reason: e.to_string(),
    }
}

fn parse_stored_date(value: &str) -> Result<NaiveDate, DemandcastError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| DemandcastError::Database {
        reason: format!("invalid stored date '{}': {}", value, e),
    })
}

impl SqliteAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DemandcastError> {
        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| DemandcastError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("sqlite", "pool_size", 4).max(1) as u32;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(pool_error)?;

        tracing::debug!(path = %db_path, pool_size, "opened sqlite pool");
        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, DemandcastError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(pool_error)?;

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, DemandcastError> {
        self.pool.get().map_err(pool_error)
    }

    pub fn initialize_schema(&self) -> Result<(), DemandcastError> {
        let conn = self.conn()?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sales (
                location TEXT NOT NULL,
                date TEXT NOT NULL,
                item TEXT NOT NULL,
                quantity INTEGER NOT NULL CHECK (quantity >= 0)
            );
            CREATE INDEX IF NOT EXISTS idx_sales_location_date ON sales(location, date);",
        )
        .map_err(query_error)?;

        Ok(())
    }

    /// Appends records for `location`. Duplicate (date, item) rows are kept;
    /// aggregation is the caller's concern.
    pub fn insert_records(
        &self,
        location: &str,
        records: &[SalesRecord],
    ) -> Result<usize, DemandcastError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(query_error)?;

        for record in records {
            let quantity = i64::try_from(record.quantity).map_err(|_| {
                DemandcastError::DatabaseQuery {
                    reason: format!("quantity {} out of range", record.quantity),
                }
            })?;
            tx.execute(
                "INSERT INTO sales (location, date, item, quantity) VALUES (?1, ?2, ?3, ?4)",
                params![
                    location,
                    record.date.format("%Y-%m-%d").to_string(),
                    record.item,
                    quantity
                ],
            )
            .map_err(query_error)?;
        }

        tx.commit().map_err(query_error)?;
        Ok(records.len())
    }
}

impl SalesDataPort for SqliteAdapter {
    fn fetch_sales(
        &self,
        location: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SalesRecord>, DemandcastError> {
        let conn = self.conn()?;

        let start_str = start_date.format("%Y-%m-%d").to_string();
        let end_str = end_date.format("%Y-%m-%d").to_string();

        let query = "SELECT date, item, quantity
                     FROM sales
                     WHERE location = ?1 AND date >= ?2 AND date <= ?3
                     ORDER BY date ASC, item ASC";

        let mut stmt = conn.prepare(query).map_err(query_error)?;

        let rows = stmt
            .query_map(params![location, start_str, end_str], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })
            .map_err(query_error)?;

        let mut records = Vec::new();
        for row in rows {
            let (date_str, item, quantity) = row.map_err(query_error)?;
            let date = parse_stored_date(&date_str)?;
            records.push(SalesRecord::new(date, item, quantity.max(0) as u64));
        }

        tracing::debug!(location, count = records.len(), "loaded sales from sqlite");
        Ok(records)
    }

    fn list_locations(&self) -> Result<Vec<String>, DemandcastError> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare("SELECT DISTINCT location FROM sales ORDER BY location")
            .map_err(query_error)?;

        let rows = stmt.query_map([], |row| row.get(0)).map_err(query_error)?;

        let mut locations = Vec::new();
        for row in rows {
            locations.push(row.map_err(query_error)?);
        }

        Ok(locations)
    }

    fn get_data_range(
        &self,
        location: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DemandcastError> {
        let conn = self.conn()?;

        let query = "SELECT MIN(date), MAX(date), COUNT(*) FROM sales WHERE location = ?1";

        let result: (Option<String>, Option<String>, i64) = conn
            .query_row(query, params![location], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .map_err(query_error)?;

        match result {
            (Some(min_str), Some(max_str), count) if count > 0 => {
                let min = parse_stored_date(&min_str)?;
                let max = parse_stored_date(&max_str)?;
                Ok(Some((min, max, count as usize)))
            }
            _ => Ok(None),
        }
    }
}
