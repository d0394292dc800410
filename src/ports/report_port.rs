//! Forecast delivery port trait.

use crate::domain::error::DemandcastError;
use crate::domain::forecast::ForecastResult;
use chrono::NaiveDate;

/// Port for delivering a finished forecast to its audience.
pub trait ForecastReportPort {
    fn deliver(
        &self,
        result: &ForecastResult,
        target_date: NaiveDate,
        location: &str,
    ) -> Result<(), DemandcastError>;
}
