//! Sales history access port trait.

use crate::domain::error::DemandcastError;
use crate::domain::sales::SalesRecord;
use chrono::NaiveDate;

pub trait SalesDataPort {
    /// All records for `location` with `start_date <= date <= end_date`.
    fn fetch_sales(
        &self,
        location: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SalesRecord>, DemandcastError>;

    fn list_locations(&self) -> Result<Vec<String>, DemandcastError>;

    /// (first date, last date, record count), or `None` when the location has no data.
    fn get_data_range(
        &self,
        location: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DemandcastError>;
}
