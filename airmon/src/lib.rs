//! airmon loads hourly PM2.5 monitoring snapshots and answers questions about them.
//!
//! Overview
//! - Loads `latest` or `daily` archive snapshots through connectors that implement
//!   the `airmon_core::MonitorConnector` contract.
//! - Normalizes raw tables into a `SeriesCollection` and replaces the current
//!   collection only when a load succeeds.
//! - Exposes NowCast, daily averages, current status, and GeoJSON over the
//!   current collection.
//!
//! Key behaviors and trade-offs
//! - Fetch strategy:
//!   - `PriorityWithFallback`: registration order, per-connector timeout, aggregated
//!     errors; fewer concurrent requests but potentially higher latency.
//!   - `Latency`: races eligible connectors; lowest tail latency but more requests.
//! - A load that fails for any reason leaves the previous collection in place.
//! - `load_many` is all-or-nothing: snapshots from several providers are combined
//!   only when every one of them loaded.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use airmon::{Monitor, Provider};
//! use airmon_airfire::AirFireConnector;
//!
//! let mut monitor = Monitor::builder()
//!     .with_connector(Arc::new(AirFireConnector::new_default()))
//!     .build()?;
//! monitor.load_latest(Provider::AirNow).await?;
//!
//! for status in monitor.current_status() {
//!     println!("{} {:?}", status.meta.device_deployment_id, status.last_valid_pm25);
//! }
//! let nowcast = monitor.nowcast(monitor.ids()[0])?;
//! ```
#![warn(missing_docs)]

mod core;
mod load;
mod query;
mod util;

pub use core::{Monitor, MonitorBuilder};

pub use airmon_airfire::AirFireConnector;
pub use airmon_core::{
    AirmonError, ConnectorKey, DailyAverage, FeatureCollection, FetchStrategy, MonitorConfig,
    MonitorConnector, Provider, SeriesCollection, SeriesMeta, SeriesStatus, Timespan,
};
#[cfg(feature = "dataframe")]
pub use airmon_core::ToDataFrame;
