//! Deterministic connectors for tests and examples.
//!
//! - [`MockConnector`] serves fixed fixture snapshots for every provider.
//! - [`DynamicMockConnector`] defers each fetch to behavior scripted through a
//!   [`DynamicMockController`].
use async_trait::async_trait;
use airmon_core::connector::MonitorConnector;
use airmon_core::{AirmonError, Provider, RawResources, Timespan};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};
pub use fixtures::{hours as fixture_hours, start as fixture_start};

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
///
/// Fixtures carry the messiness of real archives: `NA` cells, a negative
/// reading, an all-missing series, and a non-core metadata column.
pub struct MockConnector {
    latency: Option<std::time::Duration>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self { latency: None }
    }

    /// Delay every fetch, to exercise orchestrator timeouts.
    #[must_use]
    pub const fn with_latency(latency: std::time::Duration) -> Self {
        Self {
            latency: Some(latency),
        }
    }
}

#[async_trait]
impl MonitorConnector for MockConnector {
    fn name(&self) -> &'static str {
        "airmon-mock"
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supports_provider(&self, _provider: Provider) -> bool {
        true
    }

    async fn fetch(
        &self,
        provider: Provider,
        timespan: Timespan,
    ) -> Result<RawResources, AirmonError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        Ok(fixtures::snapshot(provider, timespan))
    }
}
