//! Plain-text forecast delivery implementing ForecastReportPort.
//!
//! Writes the ranked forecast message to a file, or to stdout when no path
//! is configured.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::error::DemandcastError;
use crate::domain::forecast::ForecastResult;
use crate::domain::report::{format_forecast_message, DEFAULT_TITLE};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ForecastReportPort;

pub struct TextReportAdapter {
    output: Option<PathBuf>,
    title: String,
}

impl TextReportAdapter {
    pub fn new(output: Option<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            output,
            title: title.into(),
        }
    }

    pub fn stdout() -> Self {
        Self::new(None, DEFAULT_TITLE)
    }

    /// `[report] output` and `[report] title`; an explicit `output` wins.
    pub fn from_config(config: &dyn ConfigPort, output: Option<PathBuf>) -> Self {
        let output = output.or_else(|| {
            config
                .get_string("report", "output")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
        });
        let title = config
            .get_string("report", "title")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        Self::new(output, title)
    }

    fn heading(&self, location: &str) -> String {
        if location.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, location)
        }
    }
}

impl ForecastReportPort for TextReportAdapter {
    fn deliver(
        &self,
        result: &ForecastResult,
        target_date: NaiveDate,
        location: &str,
    ) -> Result<(), DemandcastError> {
        let message = format_forecast_message(result, target_date, &self.heading(location));

        match &self.output {
            Some(path) => {
                fs::write(path, &message)?;
                tracing::info!(path = %path.display(), items = result.len(), "forecast written");
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(message.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}
