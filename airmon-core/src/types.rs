//! Re-export of foundational types from `airmon-types`.
// Consolidated re-exports so downstream crates can depend on `airmon-core` only

pub use airmon_types::{AirmonError, ConnectorKey, FetchStrategy, MonitorConfig, Provider, Timespan};
