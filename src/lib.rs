//! demandcast — next-day demand forecasting for restaurant menu items.
//!
//! Hexagonal architecture: the forecasting engine and its estimators live in
//! [`domain`], port traits in [`ports`], concrete storage/config/delivery
//! implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
pub mod logging;
