//! Configuration types shared across the orchestrator and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Strategy for selecting among eligible connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Use registration order and fall back to the next connector on failure.
    #[default]
    PriorityWithFallback,
    /// Race all eligible connectors concurrently and keep the first success.
    Latency,
}

/// Global configuration for the `Monitor` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Strategy for fetching from multiple connectors.
    pub fetch_strategy: FetchStrategy,
    /// Timeout for individual connector fetches.
    pub provider_timeout: Duration,
    /// Optional overall deadline for a load, across every connector attempt.
    pub request_timeout: Option<Duration>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            fetch_strategy: FetchStrategy::default(),
            provider_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}
