//! airmon-core
//!
//! Core types, the connector trait, and time-series operations for hourly
//! PM2.5 monitoring data.
//!
//! - `model`: the series collection (metadata records plus a wide value table).
//! - `timeseries`: combine, select, trim, NowCast, daily averages, status.
//! - `ingest`: normalization of raw text tables into typed collections.
//! - `connector`: the `MonitorConnector` trait implemented by data sources.
//! - `geojson`: point-feature output built from current status.
//!
//! Every operation on a `SeriesCollection` is synchronous and returns a new
//! collection; unchanged columns are shared with the input. Only connectors
//! are async, and they assume a Tokio 1.x runtime.

#![warn(missing_docs)]

/// The `MonitorConnector` interface implemented by data sources.
pub mod connector;
/// Polars export of collections.
#[cfg(feature = "dataframe")]
pub mod dataframe;
/// GeoJSON point features built from current status.
pub mod geojson;
/// Raw text table normalization.
pub mod ingest;
/// Series collection, metadata records and value tables.
pub mod model;
/// Combine, select, trim, NowCast, daily and status operations.
pub mod timeseries;
/// Re-exports of `airmon-types`.
pub mod types;

pub use connector::MonitorConnector;
#[cfg(feature = "dataframe")]
pub use dataframe::ToDataFrame;
pub use geojson::{FeatureCollection, to_geojson};
pub use ingest::{RawResources, RawTable, collection_from_raw};
pub use model::{
    CORE_METADATA_NAMES, Column, MetaValue, SeriesCollection, SeriesMeta, ValueTable, round1,
};
pub use timeseries::align::combine_all;
pub use timeseries::daily::DailyAverage;
pub use timeseries::nowcast::nowcast_window;
pub use timeseries::status::SeriesStatus;
pub use types::*;
