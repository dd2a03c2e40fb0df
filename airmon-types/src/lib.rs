//! Airmon-specific error, configuration, and provider primitives shared by every crate.
#![warn(missing_docs)]

mod config;
mod connector;
mod error;
mod provider;

pub use config::{FetchStrategy, MonitorConfig};
pub use connector::ConnectorKey;
pub use error::AirmonError;
pub use provider::{Provider, Timespan};
