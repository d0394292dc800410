//! Port traits separating the engine from storage, configuration and delivery.

pub mod config_port;
pub mod data_port;
pub mod report_port;
