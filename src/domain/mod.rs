//! Core domain types and the forecasting engine.

pub mod sales;
pub mod series;
pub mod estimator;
pub mod ensemble;
pub mod forecast;
pub mod report;
pub mod config_validation;
pub mod error;
