//! Domain error types.
//!
//! The forecasting engine itself never fails; these errors come from the
//! adapters that load configuration and build `SalesRecord` values.

/// Top-level error type for demandcast.
#[derive(Debug, thiserror::Error)]
pub enum DemandcastError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid sales record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("no sales data for location {location}")]
    NoData { location: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DemandcastError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        DemandcastError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&DemandcastError> for std::process::ExitCode {
    fn from(err: &DemandcastError) -> Self {
        let code: u8 = match err {
            DemandcastError::Io(_) => 1,
            DemandcastError::ConfigParse { .. }
            | DemandcastError::ConfigMissing { .. }
            | DemandcastError::ConfigInvalid { .. } => 2,
            DemandcastError::Database { .. } | DemandcastError::DatabaseQuery { .. } => 3,
            DemandcastError::InvalidRecord { .. } => 4,
            DemandcastError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
